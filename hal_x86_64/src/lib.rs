//! # x86_64 Hardware Abstraction Layer
//!
//! This crate implements the HAL traits for x86_64 architecture.
//!
//! ## Scope
//!
//! Interrupt masking (`cli`/`sti`), raw port I/O and a 16550 serial console.
//! Instructions that would fault in a hosted process are only emitted when
//! building for a bare-metal target; hosted builds track state in memory so
//! the logic stays testable.

#![cfg_attr(not(test), no_std)]

use hal::InterruptHal;

pub mod port_io;
pub mod serial;

#[cfg(test)]
pub use port_io::FakePortIo;
pub use port_io::{PortIo, RealPortIo};
pub use serial::{SerialConsole, SerialError, COM1_BASE};

/// Interrupt enable flag bit in RFLAGS
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
const RFLAGS_IF: u64 = 1 << 9;

/// x86_64 interrupt flag control
pub struct X86_64Interrupts {
    #[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
    enabled: bool,
}

impl X86_64Interrupts {
    /// Creates a new interrupt controller handle
    pub const fn new() -> Self {
        Self {
            #[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
            enabled: false,
        }
    }
}

impl Default for X86_64Interrupts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
impl InterruptHal for X86_64Interrupts {
    fn enable_interrupts(&mut self) {
        // SAFETY: ring 0 only; sets IF so pending IRQs may be delivered.
        unsafe { core::arch::asm!("sti", options(nomem, nostack)) };
    }

    fn disable_interrupts(&mut self) {
        // SAFETY: ring 0 only; clears IF.
        unsafe { core::arch::asm!("cli", options(nomem, nostack)) };
    }

    fn interrupts_enabled(&self) -> bool {
        let rflags: u64;
        // SAFETY: pushfq/pop only touches the stack slot it allocates.
        unsafe {
            core::arch::asm!("pushfq", "pop {}", out(reg) rflags, options(nomem, preserves_flags));
        }
        rflags & RFLAGS_IF != 0
    }
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
impl InterruptHal for X86_64Interrupts {
    fn enable_interrupts(&mut self) {
        self.enabled = true;
    }

    fn disable_interrupts(&mut self) {
        self.enabled = false;
    }

    fn interrupts_enabled(&self) -> bool {
        self.enabled
    }
}
