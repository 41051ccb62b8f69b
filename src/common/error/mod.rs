//! Unified error types for retype.
//!
//! Detection itself never fails on content: unknown data yields `None` and
//! broken archives fall back to the generic ZIP tag. These errors only cover
//! the I/O around it (opening inputs, staging copies, packaging).

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
