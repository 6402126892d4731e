//! # Kernel log
//!
//! Leveled log lines written through a [`ScratchConsole`]. Each line is
//! `"<level>: "` followed by the rendered message, produced in a single
//! render so a line is never split by another writer.

use hal::{ConsoleSink, InterruptHal};

use crate::args::ArgCursor;
use crate::console::ScratchConsole;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl LogLevel {
    /// Prefix written ahead of each line
    pub const fn tag(self) -> &'static [u8] {
        match self {
            LogLevel::Debug => b"debug",
            LogLevel::Info => b"info",
            LogLevel::Warn => b"warn",
            LogLevel::Error => b"error",
        }
    }
}

/// Level filter in front of a console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
    min_level: LogLevel,
}

impl Logger {
    /// Creates a logger that drops lines below `min_level`
    pub const fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Writes one log line; returns the bytes written (0 when filtered)
    ///
    /// Arguments of a filtered line are left unread.
    pub fn log<S, I>(
        &self,
        console: &mut ScratchConsole<S, I>,
        level: LogLevel,
        template: &[u8],
        args: &mut ArgCursor<'_>,
    ) -> usize
    where
        S: ConsoleSink,
        I: InterruptHal,
    {
        if !self.enabled(level) {
            return 0;
        }
        console.emit(&[level.tag(), b": "], template, args)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}
