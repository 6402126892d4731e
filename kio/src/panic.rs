//! Panic diagnostic dump
//!
//! Formats the panic screen: an optional banner on the sink's alert screen,
//! the caller's message and the saved general-purpose registers. Halting is
//! left to the caller.

use hal::{ConsoleSink, InterruptHal};

use crate::args::{Arg, ArgCursor};
use crate::console::ScratchConsole;

/// Banner shown above the panic details
pub const PANIC_BANNER: &[u8] = b"\n\
An error has been detected and your computer has been\n\
frozen to prevent damage to your devices and data.\n\
\n\
It is OK to turn off or restart your computer.\n\
\n\
Details:\n\
\n";

const REGISTER_TEMPLATE: &[u8] = b" eax=%08x ebx=%08x ecx=%08x edx=%08x\n \
esi=%08x edi=%08x ebp=%08x esp=%08x\n";

/// Saved general-purpose registers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSet {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub si: u32,
    pub di: u32,
    pub bp: u32,
    pub sp: u32,
}

/// Panic screen settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanicReport {
    banner: bool,
}

impl PanicReport {
    /// A report that shows the banner
    pub const fn new() -> Self {
        Self { banner: true }
    }

    pub fn banner(&self) -> bool {
        self.banner
    }

    pub fn set_banner(&mut self, banner: bool) {
        self.banner = banner;
    }

    /// Writes the panic screen; returns the bytes written
    pub fn dump<S, I>(
        &self,
        console: &mut ScratchConsole<S, I>,
        regs: &RegisterSet,
        template: &[u8],
        args: &mut ArgCursor<'_>,
    ) -> usize
    where
        S: ConsoleSink,
        I: InterruptHal,
    {
        let mut written = 0;
        if self.banner {
            console.sink_mut().enter_alert_screen();
            written += console.vprintf(PANIC_BANNER, &mut ArgCursor::empty());
        }
        written += console.emit(&[b"panic: "], template, args);
        written + print_register_set(console, regs)
    }
}

impl Default for PanicReport {
    fn default() -> Self {
        Self::new()
    }
}

fn print_register_set<S, I>(console: &mut ScratchConsole<S, I>, regs: &RegisterSet) -> usize
where
    S: ConsoleSink,
    I: InterruptHal,
{
    let args = [
        Arg::from(regs.a),
        Arg::from(regs.b),
        Arg::from(regs.c),
        Arg::from(regs.d),
        Arg::from(regs.si),
        Arg::from(regs.di),
        Arg::from(regs.bp),
        Arg::from(regs.sp),
    ];
    console.vprintf(REGISTER_TEMPLATE, &mut ArgCursor::new(&args))
}
