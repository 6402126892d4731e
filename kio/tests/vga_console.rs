//! Console-forwarding render onto the VGA text console

use console_vga::{VgaConsole, ALERT_ATTR, DEFAULT_ATTR, VGA_HEIGHT, VGA_WIDTH};
use hal_x86_64::X86_64Interrupts;
use kio::{kprintf, ArgCursor, PanicReport, RegisterSet, ScratchConsole};

struct CellBuffer(Vec<u8>);

impl CellBuffer {
    fn new() -> Self {
        Self(vec![0u8; VGA_WIDTH * VGA_HEIGHT * 2])
    }

    fn row_text(&self, row: usize) -> String {
        (0..VGA_WIDTH)
            .map(|col| self.0[(row * VGA_WIDTH + col) * 2] as char)
            .collect::<String>()
            .trim_end_matches(|c| c == ' ' || c == '\0')
            .to_string()
    }

    fn attr(&self, col: usize, row: usize) -> u8 {
        self.0[(row * VGA_WIDTH + col) * 2 + 1]
    }
}

#[test]
fn test_kprintf_lands_on_screen() {
    let mut cells = CellBuffer::new();
    let vga = unsafe { VgaConsole::new(cells.0.as_mut_ptr() as usize) };
    let mut console = Box::new(ScratchConsole::new(vga, X86_64Interrupts::new()));

    let n = kprintf!(console, "boot: %s\nmem %u KiB\n", "ok", 640);
    assert_eq!(n, 21);
    assert_eq!(console.sink().cursor(), (0, 2));
    drop(console);

    assert_eq!(cells.row_text(0), "boot: ok");
    assert_eq!(cells.row_text(1), "mem 640 KiB");
    assert_eq!(cells.attr(0, 0), DEFAULT_ATTR);
}

#[test]
fn test_panic_dump_uses_alert_screen() {
    let mut cells = CellBuffer::new();
    let vga = unsafe { VgaConsole::new(cells.0.as_mut_ptr() as usize) };
    let mut console = Box::new(ScratchConsole::new(vga, X86_64Interrupts::new()));

    kprintf!(console, "stale line\n");
    PanicReport::new().dump(
        &mut console,
        &RegisterSet::default(),
        b"double fault\n",
        &mut ArgCursor::empty(),
    );
    drop(console);

    assert_eq!(cells.row_text(0), "");
    assert_eq!(cells.row_text(1), "An error has been detected and your computer has been");
    assert!((0..VGA_HEIGHT).any(|row| cells.row_text(row) == "panic: double fault"));
    assert_eq!(cells.attr(0, 0), ALERT_ATTR);
}
