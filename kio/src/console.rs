//! Console-forwarding render
//!
//! [`ScratchConsole`] owns a sink, the interrupt control and one pre-zeroed
//! page. A render masks interrupts, fills the page, hands the result to the
//! sink and restores the interrupt flag, so a handler firing mid-render
//! cannot interleave its own output into the same page.
//!
//! [`SharedConsole`] makes a console reachable from a `static`. Entry is
//! guarded by a flag rather than a spinlock: on a single core a nested
//! entry (a handler, or the sink itself, printing while a render is in
//! flight) would spin forever, so it is refused with [`ConsoleError::Busy`].

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, Ordering};

use hal::{without_interrupts, ConsoleSink, InterruptHal};
use thiserror::Error;

use crate::args::ArgCursor;
use crate::config::SCRATCH_BUFFER_SIZE;
use crate::cursor::{Capacity, RenderCursor};
use crate::render::render;

/// Errors from the shared console
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// A render is already in progress on this console
    #[error("console is busy")]
    Busy,

    /// No console has been installed yet
    #[error("console not installed")]
    NotInstalled,

    /// A console was already installed
    #[error("console already installed")]
    AlreadyInstalled,
}

/// Console sink plus its private scratch page
pub struct ScratchConsole<S, I> {
    sink: S,
    irq: I,
    scratch: [u8; SCRATCH_BUFFER_SIZE],
}

impl<S: ConsoleSink, I: InterruptHal> ScratchConsole<S, I> {
    /// Creates a console with a zero-filled scratch page
    pub const fn new(sink: S, irq: I) -> Self {
        Self {
            sink,
            irq,
            scratch: [0; SCRATCH_BUFFER_SIZE],
        }
    }

    /// Renders into the scratch page and writes the result to the sink
    ///
    /// Output longer than the page is truncated. Returns the number of
    /// bytes written.
    pub fn vprintf(&mut self, template: &[u8], args: &mut ArgCursor<'_>) -> usize {
        self.emit(&[], template, args)
    }

    /// Like [`vprintf`](Self::vprintf), with fixed fragments copied ahead of
    /// the rendered template in the same pass
    pub(crate) fn emit(&mut self, prefix: &[&[u8]], template: &[u8], args: &mut ArgCursor<'_>) -> usize {
        let Self { sink, irq, scratch } = self;
        without_interrupts(irq, || {
            let mut out = RenderCursor::new(scratch, Capacity::Bounded(SCRATCH_BUFFER_SIZE));
            for fragment in prefix {
                out.put_bytes(fragment);
            }
            let written = render(out, template, args);
            sink.write_str(&scratch[..written]);
            written
        })
    }

    /// Writes a single byte straight to the sink
    pub fn putc(&mut self, ch: u8) {
        self.sink.write_char(ch);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn irq(&self) -> &I {
        &self.irq
    }
}

/// A [`ScratchConsole`] that can live in a `static`
pub struct SharedConsole<S, I> {
    busy: AtomicBool,
    slot: UnsafeCell<Option<ScratchConsole<S, I>>>,
}

// SAFETY: all access to `slot` happens between a successful
// compare_exchange on `busy` and the matching release store.
unsafe impl<S: Send, I: Send> Sync for SharedConsole<S, I> {}

impl<S: ConsoleSink, I: InterruptHal> SharedConsole<S, I> {
    /// Creates an empty holder
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            slot: UnsafeCell::new(None),
        }
    }

    /// Installs the console; only the first install succeeds
    pub fn install(&self, console: ScratchConsole<S, I>) -> Result<(), ConsoleError> {
        self.enter(|slot| {
            if slot.is_some() {
                return Err(ConsoleError::AlreadyInstalled);
            }
            *slot = Some(console);
            Ok(())
        })?
    }

    /// Whether a console has been installed
    pub fn is_installed(&self) -> Result<bool, ConsoleError> {
        self.enter(|slot| slot.is_some())
    }

    /// Runs `f` with exclusive access to the installed console
    pub fn with<R>(&self, f: impl FnOnce(&mut ScratchConsole<S, I>) -> R) -> Result<R, ConsoleError> {
        self.enter(|slot| slot.as_mut().map(f).ok_or(ConsoleError::NotInstalled))?
    }

    /// Console-forwarding render through the installed console
    pub fn vprintf(&self, template: &[u8], args: &mut ArgCursor<'_>) -> Result<usize, ConsoleError> {
        self.with(|console| console.vprintf(template, args))
    }

    fn enter<R>(&self, f: impl FnOnce(&mut Option<ScratchConsole<S, I>>) -> R) -> Result<R, ConsoleError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ConsoleError::Busy);
        }
        // SAFETY: `busy` was false and is now ours, so no other reference
        // into `slot` exists until the store below.
        let result = f(unsafe { &mut *self.slot.get() });
        self.busy.store(false, Ordering::Release);
        Ok(result)
    }
}

impl<S: ConsoleSink, I: InterruptHal> Default for SharedConsole<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Arg;
    use hal_x86_64::X86_64Interrupts;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingSink {
        out: Vec<u8>,
        writes: usize,
    }

    impl ConsoleSink for RecordingSink {
        fn write_char(&mut self, ch: u8) {
            self.out.push(ch);
        }

        fn write_str(&mut self, s: &[u8]) {
            self.writes += 1;
            self.out.extend(s.iter().take_while(|&&b| b != 0));
        }
    }

    /// Interrupt flag shared with a sink so the sink can observe it
    struct ProbeIrq(Rc<Cell<bool>>);

    impl InterruptHal for ProbeIrq {
        fn enable_interrupts(&mut self) {
            self.0.set(true);
        }

        fn disable_interrupts(&mut self) {
            self.0.set(false);
        }

        fn interrupts_enabled(&self) -> bool {
            self.0.get()
        }
    }

    struct ProbeSink {
        irq: Rc<Cell<bool>>,
        enabled_during_write: Vec<bool>,
    }

    impl ConsoleSink for ProbeSink {
        fn write_char(&mut self, _ch: u8) {
            self.enabled_during_write.push(self.irq.get());
        }
    }

    fn recording_console() -> Box<ScratchConsole<RecordingSink, X86_64Interrupts>> {
        Box::new(ScratchConsole::new(RecordingSink::default(), X86_64Interrupts::new()))
    }

    #[test]
    fn test_vprintf_forwards_to_sink() {
        let mut console = recording_console();
        let n = crate::kprintf!(console, "tick %u\n", 3);
        assert_eq!(n, 7);
        assert_eq!(console.sink().out, b"tick 3\n");
        assert_eq!(console.sink().writes, 1);
    }

    #[test]
    fn test_scratch_is_reused_between_renders() {
        let mut console = recording_console();
        crate::kprintf!(console, "a long first line");
        crate::kprintf!(console, "%d", 1);
        assert_eq!(console.sink().out, b"a long first line1");
    }

    #[test]
    fn test_output_truncated_to_page() {
        let mut console = recording_console();
        let long = [b'x'; SCRATCH_BUFFER_SIZE + 10];
        let args = [Arg::Str(&long)];
        let n = console.vprintf(b"%s", &mut ArgCursor::new(&args));
        assert_eq!(n, SCRATCH_BUFFER_SIZE - 1);
        assert_eq!(console.sink().out.len(), SCRATCH_BUFFER_SIZE - 1);
    }

    #[test]
    fn test_interrupts_masked_while_writing() {
        let flag = Rc::new(Cell::new(true));
        let sink = ProbeSink {
            irq: flag.clone(),
            enabled_during_write: Vec::new(),
        };
        let mut console = Box::new(ScratchConsole::new(sink, ProbeIrq(flag.clone())));

        crate::kprintf!(console, "ok");
        assert_eq!(console.sink().enabled_during_write, vec![false, false]);
        assert!(flag.get());
    }

    #[test]
    fn test_putc_bypasses_scratch() {
        let mut console = recording_console();
        console.putc(b'!');
        assert_eq!(console.sink().out, b"!");
        assert_eq!(console.sink().writes, 0);
    }

    #[test]
    fn test_shared_console_lifecycle() {
        let shared: SharedConsole<RecordingSink, X86_64Interrupts> = SharedConsole::new();
        assert_eq!(
            crate::kprintf!(shared, "early"),
            Err(ConsoleError::NotInstalled)
        );
        assert_eq!(shared.is_installed(), Ok(false));

        shared
            .install(ScratchConsole::new(RecordingSink::default(), X86_64Interrupts::new()))
            .unwrap();
        assert_eq!(crate::kprintf!(shared, "%s!", "up"), Ok(3));

        let again = shared.install(ScratchConsole::new(
            RecordingSink::default(),
            X86_64Interrupts::new(),
        ));
        assert_eq!(again, Err(ConsoleError::AlreadyInstalled));

        let out = shared.with(|console| console.sink().out.clone()).unwrap();
        assert_eq!(out, b"up!");
    }

    #[test]
    fn test_shared_console_refuses_nested_render() {
        let shared: SharedConsole<RecordingSink, X86_64Interrupts> = SharedConsole::new();
        shared
            .install(ScratchConsole::new(RecordingSink::default(), X86_64Interrupts::new()))
            .unwrap();

        let nested = shared
            .with(|_console| crate::kprintf!(shared, "from a handler"))
            .unwrap();
        assert_eq!(nested, Err(ConsoleError::Busy));

        // The guard is released afterwards
        assert_eq!(crate::kprintf!(shared, "later"), Ok(5));
    }

    #[test]
    fn test_console_error_messages() {
        assert_eq!(ConsoleError::Busy.to_string(), "console is busy");
        assert_eq!(ConsoleError::NotInstalled.to_string(), "console not installed");
    }
}
