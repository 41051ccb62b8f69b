//! Unified error types for retype.
use thiserror::Error;

/// Main error type for retype operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error (reading an input archive or writing the package)
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Path has no usable file name
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type for retype operations.
pub type Result<T> = std::result::Result<T, Error>;
