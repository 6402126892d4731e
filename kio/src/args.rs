//! Variadic argument cursor
//!
//! Callers collect their arguments into a slice of [`Arg`] (the `k*printf!`
//! macros do this) and the renderer reads them front to back through an
//! [`ArgCursor`]. Each read consumes exactly one slot, whatever its payload,
//! so an unsupported directive can skip a slot and keep later directives
//! aligned.

use core::ffi::CStr;

/// One argument slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// A 32-bit integer, signed or unsigned
    Word(u32),
    /// A pointer-sized address
    Addr(usize),
    /// A byte string, ending at its first NUL or at the end of the slice
    Str(&'a [u8]),
}

impl Arg<'_> {
    /// The slot read as a 32-bit word
    ///
    /// Addresses are truncated to their low 32 bits; a string slot yields
    /// the address of its first byte.
    pub fn as_word(&self) -> u32 {
        match *self {
            Arg::Word(value) => value,
            Arg::Addr(addr) => addr as u32,
            Arg::Str(s) => s.as_ptr() as usize as u32,
        }
    }
}

macro_rules! word_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(value: $ty) -> Self {
                    Arg::Word(value as u32)
                }
            }
        )*
    };
}

// Narrow signed values sign-extend, as C's default argument promotion does
word_from!(i8, u8, i16, u16, i32, u32);

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Word(value as u32)
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Arg::Addr(value)
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(value: *const T) -> Self {
        Arg::Addr(value as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(value: *mut T) -> Self {
        Arg::Addr(value as usize)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Arg::Str(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Arg::Str(value)
    }
}

impl<'a> From<&'a CStr> for Arg<'a> {
    fn from(value: &'a CStr) -> Self {
        Arg::Str(value.to_bytes())
    }
}

/// Sequential reader over a caller's argument list
#[derive(Debug, Clone)]
pub struct ArgCursor<'a> {
    args: &'a [Arg<'a>],
    next: usize,
}

impl<'a> ArgCursor<'a> {
    /// Positions the cursor at the first argument
    pub const fn new(args: &'a [Arg<'a>]) -> Self {
        Self { args, next: 0 }
    }

    /// Empty argument list
    pub const fn empty() -> Self {
        Self::new(&[])
    }

    fn advance(&mut self) -> Option<Arg<'a>> {
        let arg = self.args.get(self.next).copied();
        if arg.is_some() {
            self.next += 1;
        }
        arg
    }

    /// Reads the next slot as a 32-bit word
    ///
    /// Reading past the end yields `0`.
    pub fn next_word(&mut self) -> u32 {
        self.advance().map_or(0, |arg| arg.as_word())
    }

    /// Reads the next slot as a string
    ///
    /// Yields `None` for a non-string slot (the slot is still consumed) or
    /// past the end.
    pub fn next_str(&mut self) -> Option<&'a [u8]> {
        match self.advance()? {
            Arg::Str(s) => Some(s),
            Arg::Word(_) | Arg::Addr(_) => None,
        }
    }

    /// Number of slots consumed so far
    pub fn consumed(&self) -> usize {
        self.next
    }

    /// Number of slots not yet consumed
    pub fn remaining(&self) -> usize {
        self.args.len() - self.next
    }
}
