//! 16550 UART console
//!
//! Drives a PC serial port as a write-only [`ConsoleSink`]. Useful where no
//! VGA text buffer exists (headless QEMU, `-serial stdio`).

use crate::port_io::PortIo;
use hal::ConsoleSink;
use thiserror::Error;

/// Base I/O port of the first serial controller
pub const COM1_BASE: u16 = 0x3F8;

const DATA: u16 = 0;
const INT_ENABLE: u16 = 1;
const FIFO_CTRL: u16 = 2;
const LINE_CTRL: u16 = 3;
const MODEM_CTRL: u16 = 4;
const LINE_STATUS: u16 = 5;

/// Line status: transmit holding register empty
const LSR_THR_EMPTY: u8 = 0x20;

/// Byte echoed through the loopback self-test
const LOOPBACK_PROBE: u8 = 0xAE;

/// Polls of the line status register before a byte is sent anyway
pub const TX_SPIN_LIMIT: usize = 100_000;

/// Errors that can occur while bringing up the UART
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerialError {
    /// The loopback self-test read back a different byte
    #[error("Serial loopback failed: expected {expected:#04x}, got {got:#04x}")]
    LoopbackMismatch { expected: u8, got: u8 },
}

/// Serial console over any [`PortIo`] implementation
pub struct SerialConsole<P: PortIo> {
    io: P,
    base: u16,
}

impl<P: PortIo> SerialConsole<P> {
    /// Wraps the UART at `base` without touching the hardware
    pub const fn new(io: P, base: u16) -> Self {
        Self { io, base }
    }

    /// Programs 38400 baud 8N1 with FIFOs and runs the loopback self-test
    pub fn init(&mut self) -> Result<(), SerialError> {
        self.out(INT_ENABLE, 0x00);
        self.out(LINE_CTRL, 0x80); // DLAB on
        self.out(DATA, 0x03); // divisor low: 38400 baud
        self.out(INT_ENABLE, 0x00); // divisor high
        self.out(LINE_CTRL, 0x03); // 8N1, DLAB off
        self.out(FIFO_CTRL, 0xC7);
        self.out(MODEM_CTRL, 0x1E); // loopback

        self.out(DATA, LOOPBACK_PROBE);
        let got = self.io.inb(self.base + DATA);
        if got != LOOPBACK_PROBE {
            return Err(SerialError::LoopbackMismatch {
                expected: LOOPBACK_PROBE,
                got,
            });
        }

        self.out(MODEM_CTRL, 0x0F); // normal operation, OUT1/OUT2 on
        Ok(())
    }

    /// Returns the underlying port accessor
    pub fn io(&self) -> &P {
        &self.io
    }

    fn out(&mut self, reg: u16, value: u8) {
        self.io.outb(self.base + reg, value);
    }

    fn transmit(&mut self, byte: u8) {
        for _ in 0..TX_SPIN_LIMIT {
            if self.io.inb(self.base + LINE_STATUS) & LSR_THR_EMPTY != 0 {
                break;
            }
        }
        self.out(DATA, byte);
    }
}

impl<P: PortIo> ConsoleSink for SerialConsole<P> {
    fn write_char(&mut self, ch: u8) {
        if ch == b'\n' {
            self.transmit(b'\r');
        }
        self.transmit(ch);
    }
}
