//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the hardware traits the kernel's formatted-output
//! path is written against.
//!
//! ## Philosophy
//!
//! **Architecture must be fully abstracted and swappable.**
//!
//! The formatting engine never touches a port or a register directly. It
//! talks to a [`ConsoleSink`] for visible output and to an [`InterruptHal`]
//! when it must keep interrupt handlers out of a critical section.
//!
//! ## Design Principles
//!
//! 1. **No x86-specific assumptions**: Core logic must work on any architecture
//! 2. **Trait-based**: All hardware operations go through traits
//! 3. **Testable**: HAL can be mocked for testing

#![cfg_attr(not(test), no_std)]

pub mod console;
pub mod interrupts;

pub use console::ConsoleSink;
pub use interrupts::{without_interrupts, InterruptHal};
