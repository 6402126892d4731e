//! Render cursor and bounded copy
//!
//! Every byte the renderer produces goes through [`RenderCursor::put_bytes`].
//! The cursor keeps one unit of capacity back for the NUL terminator, so a
//! render into `Bounded(k)` writes at most `k - 1` payload bytes plus the
//! terminator, and truncation never loses the terminator.

/// How much of the destination a render may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// At most this many bytes, terminator included
    Bounded(usize),
    /// No logical limit; the destination slice is the only bound
    Unbounded,
}

/// Destination write position plus remaining capacity
#[derive(Debug)]
pub struct RenderCursor<'a> {
    dst: &'a mut [u8],
    pos: usize,
    remaining: usize,
    truncated: bool,
}

impl<'a> RenderCursor<'a> {
    pub fn new(dst: &'a mut [u8], capacity: Capacity) -> Self {
        let remaining = match capacity {
            Capacity::Bounded(n) => n.min(dst.len()),
            Capacity::Unbounded => dst.len(),
        };
        Self {
            dst,
            pos: 0,
            remaining,
            truncated: false,
        }
    }

    /// Bounded copy
    ///
    /// Copies `src` up to its first NUL (or its end) while capacity lasts.
    /// If capacity runs out first, the terminator is written at the current
    /// position and the rest of `src` is dropped. Returns the number of
    /// bytes copied, terminator excluded.
    pub fn put_bytes(&mut self, src: &[u8]) -> usize {
        let mut copied = 0;
        for &byte in src.iter().take_while(|&&byte| byte != 0) {
            if self.remaining <= 1 {
                self.truncate();
                break;
            }
            self.dst[self.pos] = byte;
            self.pos += 1;
            self.remaining -= 1;
            copied += 1;
        }
        copied
    }

    /// Bounded copy of a single byte
    pub fn put_byte(&mut self, byte: u8) -> usize {
        self.put_bytes(&[byte])
    }

    fn truncate(&mut self) {
        if self.remaining == 1 {
            self.dst[self.pos] = 0;
            self.remaining = 0;
        }
        self.truncated = true;
    }

    /// Terminates the output and returns the number of bytes written
    ///
    /// With no capacity left (zero-capacity render, or a terminator already
    /// written by truncation) nothing further is written.
    pub fn finish(mut self) -> usize {
        if self.remaining > 0 {
            self.dst[self.pos] = 0;
            self.remaining -= 1;
        }
        self.pos
    }

    /// Bytes written so far, terminator excluded
    pub fn written(&self) -> usize {
        self.pos
    }

    /// Capacity left, counting the unit reserved for the terminator
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Whether any output has been dropped
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}
