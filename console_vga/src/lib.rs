//! # VGA Text Console
//!
//! This crate provides a VGA text mode console that writes to physical memory 0xB8000.
//!
//! ## Philosophy
//!
//! This is NOT a terminal emulator. No ANSI escape codes, no VT100, no TTY model.
//! It is a teletype-style sink for kernel diagnostics: bytes go in at the
//! cursor, `\n` starts a new row, and the screen scrolls when the last row
//! fills.
//!
//! ## Design Principles
//!
//! 1. **Minimal and deterministic**: Simple 80x25 text with attributes
//! 2. **Testable**: Pure logic tests against an in-memory cell buffer
//! 3. **No unsafe except MMIO**: Isolated to memory writes

#![cfg_attr(not(test), no_std)]

use core::ptr;
use hal::ConsoleSink;

/// VGA text mode dimensions
pub const VGA_WIDTH: usize = 80;
pub const VGA_HEIGHT: usize = 25;

/// VGA text buffer physical address
pub const VGA_TEXT_BUFFER_PHYS: usize = 0xB8000;

/// Columns advanced by a tab
const TAB_WIDTH: usize = 4;

/// VGA color codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VgaColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

impl VgaColor {
    /// Make a VGA attribute byte from foreground and background colors
    pub const fn make_attr(fg: VgaColor, bg: VgaColor) -> u8 {
        (bg as u8) << 4 | (fg as u8)
    }
}

/// Default attribute: light gray on black
pub const DEFAULT_ATTR: u8 = VgaColor::make_attr(VgaColor::LightGray, VgaColor::Black);

/// Alert attribute used by the panic screen: white on blue
pub const ALERT_ATTR: u8 = VgaColor::make_attr(VgaColor::White, VgaColor::Blue);

/// VGA text console with a teletype cursor
pub struct VgaConsole {
    buffer: *mut u8,
    col: usize,
    row: usize,
    attr: u8,
}

impl VgaConsole {
    /// Create a new VGA console with the given virtual address of the VGA buffer
    ///
    /// # Safety
    ///
    /// The caller must ensure that `virt_addr` points to a valid, mapped VGA
    /// text buffer of `VGA_WIDTH * VGA_HEIGHT * 2` bytes that nothing else
    /// writes to.
    pub unsafe fn new(virt_addr: usize) -> Self {
        Self {
            buffer: virt_addr as *mut u8,
            col: 0,
            row: 0,
            attr: DEFAULT_ATTR,
        }
    }

    /// Returns the cursor position as (col, row)
    pub fn cursor(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    /// Returns the attribute applied to newly written characters
    pub fn attr(&self) -> u8 {
        self.attr
    }

    /// Sets the attribute applied to newly written characters
    pub fn set_attr(&mut self, attr: u8) {
        self.attr = attr;
    }

    /// Clear the screen with the current attribute and home the cursor
    pub fn clear(&mut self) {
        for row in 0..VGA_HEIGHT {
            self.clear_row(row);
        }
        self.col = 0;
        self.row = 0;
    }

    fn clear_row(&mut self, row: usize) {
        let cell = ((self.attr as u16) << 8) | b' ' as u16;
        let offset = row * VGA_WIDTH * 2;
        // SAFETY: row < VGA_HEIGHT, so the whole row lies inside the buffer.
        unsafe {
            let cells = self.buffer.add(offset) as *mut u16;
            for col in 0..VGA_WIDTH {
                ptr::write_volatile(cells.add(col), cell);
            }
        }
    }

    fn put_cell(&mut self, col: usize, row: usize, ch: u8) {
        let offset = (row * VGA_WIDTH + col) * 2;
        // SAFETY: callers keep col < VGA_WIDTH and row < VGA_HEIGHT.
        unsafe {
            ptr::write_volatile(self.buffer.add(offset), ch);
            ptr::write_volatile(self.buffer.add(offset + 1), self.attr);
        }
    }

    /// Scroll the screen up by one row, clearing the bottom row
    fn scroll_up(&mut self) {
        let row_bytes = VGA_WIDTH * 2;
        let total_bytes = VGA_HEIGHT * row_bytes;
        // SAFETY: source and destination both lie inside the buffer;
        // `ptr::copy` handles the overlap.
        unsafe {
            ptr::copy(self.buffer.add(row_bytes), self.buffer, total_bytes - row_bytes);
        }
        self.clear_row(VGA_HEIGHT - 1);
    }

    fn newline(&mut self) {
        self.col = 0;
        if self.row + 1 >= VGA_HEIGHT {
            self.scroll_up();
        } else {
            self.row += 1;
        }
    }
}

impl ConsoleSink for VgaConsole {
    fn write_char(&mut self, ch: u8) {
        match ch {
            b'\n' => self.newline(),
            b'\r' => self.col = 0,
            b'\t' => {
                let next = (self.col / TAB_WIDTH + 1) * TAB_WIDTH;
                while self.col < next.min(VGA_WIDTH) {
                    self.put_cell(self.col, self.row, b' ');
                    self.col += 1;
                }
                if self.col >= VGA_WIDTH {
                    self.newline();
                }
            }
            _ => {
                self.put_cell(self.col, self.row, ch);
                self.col += 1;
                if self.col >= VGA_WIDTH {
                    self.newline();
                }
            }
        }
    }

    fn enter_alert_screen(&mut self) {
        self.attr = ALERT_ATTR;
        self.clear();
    }
}

// VgaConsole only touches VGA memory through volatile writes, and the
// constructor's contract gives it exclusive ownership of that memory.
unsafe impl Send for VgaConsole {}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock VGA buffer for testing
    struct MockVgaBuffer {
        data: Vec<u8>,
    }

    impl MockVgaBuffer {
        fn new() -> Self {
            Self {
                data: vec![0u8; VGA_WIDTH * VGA_HEIGHT * 2],
            }
        }

        fn as_ptr(&mut self) -> *mut u8 {
            self.data.as_mut_ptr()
        }

        fn get_char(&self, col: usize, row: usize) -> u8 {
            let offset = (row * VGA_WIDTH + col) * 2;
            self.data[offset]
        }

        fn get_attr(&self, col: usize, row: usize) -> u8 {
            let offset = (row * VGA_WIDTH + col) * 2;
            self.data[offset + 1]
        }
    }

    #[test]
    fn test_vga_color_attr() {
        assert_eq!(DEFAULT_ATTR, 0x07);
        assert_eq!(ALERT_ATTR, 0x1F);
        assert_eq!(VgaColor::make_attr(VgaColor::LightGreen, VgaColor::Black), 0x0A);
    }

    #[test]
    fn test_write_str_advances_cursor() {
        let mut buffer = MockVgaBuffer::new();
        let mut console = unsafe { VgaConsole::new(buffer.as_ptr() as usize) };

        console.write_str(b"Hello");
        assert_eq!(console.cursor(), (5, 0));
        assert_eq!(buffer.get_char(0, 0), b'H');
        assert_eq!(buffer.get_char(4, 0), b'o');
        assert_eq!(buffer.get_attr(4, 0), DEFAULT_ATTR);
    }

    #[test]
    fn test_newline_moves_to_next_row() {
        let mut buffer = MockVgaBuffer::new();
        let mut console = unsafe { VgaConsole::new(buffer.as_ptr() as usize) };

        console.write_str(b"ab\ncd");
        assert_eq!(console.cursor(), (2, 1));
        assert_eq!(buffer.get_char(0, 1), b'c');
    }

    #[test]
    fn test_long_line_wraps() {
        let mut buffer = MockVgaBuffer::new();
        let mut console = unsafe { VgaConsole::new(buffer.as_ptr() as usize) };

        for _ in 0..VGA_WIDTH {
            console.write_char(b'x');
        }
        console.write_char(b'y');
        assert_eq!(buffer.get_char(0, 1), b'y');
        assert_eq!(console.cursor(), (1, 1));
    }

    #[test]
    fn test_tab_pads_to_stop() {
        let mut buffer = MockVgaBuffer::new();
        let mut console = unsafe { VgaConsole::new(buffer.as_ptr() as usize) };

        console.write_str(b"a\tb");
        assert_eq!(buffer.get_char(1, 0), b' ');
        assert_eq!(buffer.get_char(4, 0), b'b');
    }

    #[test]
    fn test_scrolls_when_last_row_fills() {
        let mut buffer = MockVgaBuffer::new();
        let mut console = unsafe { VgaConsole::new(buffer.as_ptr() as usize) };

        console.write_str(b"first\n");
        for _ in 1..VGA_HEIGHT {
            console.write_str(b"line\n");
        }
        // "first" has scrolled off the top
        assert_eq!(buffer.get_char(0, 0), b'l');
        assert_eq!(buffer.get_char(0, VGA_HEIGHT - 1), b' ');
        assert_eq!(console.cursor(), (0, VGA_HEIGHT - 1));
    }

    #[test]
    fn test_alert_screen_clears_with_alert_attr() {
        let mut buffer = MockVgaBuffer::new();
        let mut console = unsafe { VgaConsole::new(buffer.as_ptr() as usize) };

        console.write_str(b"stale");
        console.enter_alert_screen();
        assert_eq!(console.cursor(), (0, 0));
        assert_eq!(console.attr(), ALERT_ATTR);
        for row in 0..VGA_HEIGHT {
            for col in 0..VGA_WIDTH {
                assert_eq!(buffer.get_char(col, row), b' ');
                assert_eq!(buffer.get_attr(col, row), ALERT_ATTR);
            }
        }
    }
}
