//! # Kernel formatted I/O
//!
//! printf-style formatting for the kernel: no allocator, no standard
//! library, no locale.
//!
//! ## Entry points
//!
//! - [`vsnprintf`] / [`ksnprintf!`]: render into a caller buffer of known
//!   capacity, always terminated, silently truncated.
//! - [`vsprintf`] / [`ksprintf!`]: render with [`Capacity::Unbounded`]; only
//!   the destination slice limits the output.
//! - [`ScratchConsole::vprintf`] / [`kprintf!`]: render into the console's
//!   own page and forward the result to its [`hal::ConsoleSink`].
//!
//! Every entry point returns the number of bytes written, terminator
//! excluded. There is no separate truncation signal.
//!
//! ## Supported directives
//!
//! `%d %i %u %x %X %p %s %%`. The scanner accepts the full
//! `%[flags][width][.precision][length]<conversion>` grammar, but flags,
//! width, precision, length and case are not applied, and the remaining
//! conversions render `<invalid>` while consuming one argument slot.

#![cfg_attr(not(test), no_std)]

pub mod args;
pub mod config;
pub mod cursor;
pub mod directive;
pub mod numfmt;
pub mod render;

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "console")]
pub mod log;
#[cfg(feature = "console")]
pub mod panic;

pub use args::{Arg, ArgCursor};
pub use cursor::{Capacity, RenderCursor};
pub use directive::{ConversionType, Directive, FieldSpec, Flags, LengthModifier};

#[cfg(feature = "console")]
pub use console::{ConsoleError, ScratchConsole, SharedConsole};
#[cfg(feature = "console")]
pub use log::{LogLevel, Logger};
#[cfg(feature = "console")]
pub use panic::{PanicReport, RegisterSet};

/// Renders into `dst`, writing at most `capacity` bytes including the terminator
pub fn vsnprintf(dst: &mut [u8], capacity: usize, template: &[u8], args: &mut ArgCursor<'_>) -> usize {
    render::render(RenderCursor::new(dst, Capacity::Bounded(capacity)), template, args)
}

/// Renders into `dst` with no capacity limit beyond the slice itself
///
/// The caller is responsible for sizing `dst`; output that does not fit is
/// truncated at the end of the slice.
pub fn vsprintf(dst: &mut [u8], template: &[u8], args: &mut ArgCursor<'_>) -> usize {
    render::render(RenderCursor::new(dst, Capacity::Unbounded), template, args)
}

/// Bounded render with a trailing argument list
///
/// ```
/// let mut buf = [0u8; 16];
/// let n = kio::ksnprintf!(&mut buf, 16, "irq %d", 14);
/// assert_eq!(&buf[..n], b"irq 14");
/// ```
#[macro_export]
macro_rules! ksnprintf {
    ($dst:expr, $capacity:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::vsnprintf(
            $dst,
            $capacity,
            ::core::convert::AsRef::<[u8]>::as_ref(&$fmt),
            &mut $crate::ArgCursor::new(&[$($crate::Arg::from($arg)),*]),
        )
    };
}

/// Unbounded render with a trailing argument list
#[macro_export]
macro_rules! ksprintf {
    ($dst:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::vsprintf(
            $dst,
            ::core::convert::AsRef::<[u8]>::as_ref(&$fmt),
            &mut $crate::ArgCursor::new(&[$($crate::Arg::from($arg)),*]),
        )
    };
}

/// Console-forwarding render with a trailing argument list
///
/// Works with a [`ScratchConsole`] (returns the byte count) or a
/// [`SharedConsole`] (returns `Result<usize, ConsoleError>`).
#[cfg(feature = "console")]
#[macro_export]
macro_rules! kprintf {
    ($console:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $console.vprintf(
            ::core::convert::AsRef::<[u8]>::as_ref(&$fmt),
            &mut $crate::ArgCursor::new(&[$($crate::Arg::from($arg)),*]),
        )
    };
}

/// Kernel log line with a trailing argument list
#[cfg(feature = "console")]
#[macro_export]
macro_rules! klog {
    ($logger:expr, $console:expr, $level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(
            $console,
            $level,
            ::core::convert::AsRef::<[u8]>::as_ref(&$fmt),
            &mut $crate::ArgCursor::new(&[$($crate::Arg::from($arg)),*]),
        )
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_ksnprintf_bounded() {
        let mut buf = [0xAAu8; 16];
        let n = ksnprintf!(&mut buf, 8, "%s=%d", "count", 1234);
        assert_eq!(n, 7);
        assert_eq!(&buf[..8], b"count=1\0");
        assert_eq!(buf[8], 0xAA);
    }

    #[test]
    fn test_ksnprintf_accepts_byte_templates() {
        let mut buf = [0u8; 16];
        let n = ksnprintf!(&mut buf, 16, b"%x", 0xC0FFEEu32);
        assert_eq!(&buf[..n], b"c0ffee");
    }

    #[test]
    fn test_ksprintf_unbounded() {
        let mut buf = [0u8; 32];
        let n = ksprintf!(&mut buf, "%d%%", 99);
        assert_eq!(&buf[..n + 1], b"99%\0");
    }

    #[test]
    fn test_ksprintf_without_arguments() {
        let mut buf = [0u8; 8];
        let n = ksprintf!(&mut buf, "plain");
        assert_eq!(&buf[..n], b"plain");
    }

    #[test]
    fn test_zero_capacity_leaves_buffer_untouched() {
        let mut buf = [0xAAu8; 4];
        let n = ksnprintf!(&mut buf, 0, "abc");
        assert_eq!(n, 0);
        assert_eq!(buf, [0xAA; 4]);
    }
}
