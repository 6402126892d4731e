//! Compile-time configuration

/// Size of one page
pub const PAGE_SIZE: usize = 4096;

/// Capacity of the console scratch buffer, terminator included
pub const SCRATCH_BUFFER_SIZE: usize = PAGE_SIZE;

/// Rendered in place of any directive the engine does not implement
pub const INVALID_PLACEHOLDER: &[u8] = b"<invalid>";

/// Rendered for `%s` when the argument slot holds no string
pub const NULL_STRING: &[u8] = b"(null)";
