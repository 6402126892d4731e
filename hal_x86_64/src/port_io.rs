//! Port I/O abstraction for x86_64
//!
//! A trait over the `in`/`out` instructions so device drivers (the serial
//! console in particular) can run against scripted ports in tests.
//!
//! ## Safety
//!
//! Port I/O talks to hardware directly. Only `RealPortIo` contains unsafe
//! code, isolated to two small functions.

/// Port I/O trait
///
/// Implementations must complete each access synchronously before returning.
pub trait PortIo {
    /// Reads a byte from an I/O port
    fn inb(&mut self, port: u16) -> u8;

    /// Writes a byte to an I/O port
    fn outb(&mut self, port: u16, value: u8);
}

/// Real hardware port I/O implementation
///
/// Uses x86 `in` and `out` instructions. Only valid in ring 0 on x86.
#[derive(Debug, Default)]
pub struct RealPortIo;

impl RealPortIo {
    /// Creates a new real port I/O implementation
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "x86_64")]
impl PortIo for RealPortIo {
    #[inline]
    fn inb(&mut self, port: u16) -> u8 {
        // SAFETY: the caller owns the device behind `port` and runs with
        // I/O privilege. `in al, dx` has no memory or stack effects.
        unsafe {
            let value: u8;
            core::arch::asm!(
                "in al, dx",
                in("dx") port,
                out("al") value,
                options(nomem, nostack, preserves_flags)
            );
            value
        }
    }

    #[inline]
    fn outb(&mut self, port: u16, value: u8) {
        // SAFETY: as for `inb`; `out dx, al` has no memory or stack effects.
        unsafe {
            core::arch::asm!(
                "out dx, al",
                in("dx") port,
                in("al") value,
                options(nomem, nostack, preserves_flags)
            );
        }
    }
}

/// Fake port I/O implementation for testing
///
/// Serves scripted reads in order and captures every write.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FakePortIo {
    /// Scripted read values: (port, value)
    read_script: Vec<(u16, u8)>,
    read_index: usize,
    /// Captured write operations: (port, value)
    writes: Vec<(u16, u8)>,
}

#[cfg(test)]
impl FakePortIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a read operation
    pub fn script_read(&mut self, port: u16, value: u8) {
        self.read_script.push((port, value));
    }

    /// Scripts the same read `count` times
    pub fn script_repeated(&mut self, port: u16, value: u8, count: usize) {
        for _ in 0..count {
            self.script_read(port, value);
        }
    }

    pub fn remaining_reads(&self) -> usize {
        self.read_script.len() - self.read_index
    }

    pub fn writes(&self) -> &[(u16, u8)] {
        &self.writes
    }

    /// Returns the bytes written to one port, in order
    pub fn writes_to(&self, port: u16) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == port)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

#[cfg(test)]
impl PortIo for FakePortIo {
    fn inb(&mut self, port: u16) -> u8 {
        let Some(&(expected_port, value)) = self.read_script.get(self.read_index) else {
            panic!(
                "FakePortIo: No scripted read for port 0x{:04X} (read_index={})",
                port, self.read_index
            );
        };
        if port != expected_port {
            panic!(
                "FakePortIo: Port mismatch at read_index={}: expected 0x{:04X}, got 0x{:04X}",
                self.read_index, expected_port, port
            );
        }
        self.read_index += 1;
        value
    }

    fn outb(&mut self, port: u16, value: u8) {
        self.writes.push((port, value));
    }
}
