//! Error types for rollchunk.
//!
//! This module defines the error type used throughout the crate.
//!
//! - [`ChunkError`] - Represents all possible errors during chunking

use std::fmt;

/// Errors that can occur during chunking operations.
///
/// `ChunkError` represents all possible error conditions that may occur while
/// chunking data: I/O errors raised by the byte-stream source and invalid
/// configuration parameters.
///
/// A chunker latches the first hard I/O error it observes: every later call
/// to `next` returns an error with the same [`std::io::ErrorKind`] and
/// message, and the source is never read again.
///
/// # Example
///
/// ```
/// use rollchunk::ChunkError;
///
/// fn handle_error(err: ChunkError) {
///     match err {
///         ChunkError::Io(io_err) => eprintln!("I/O error: {}", io_err),
///         ChunkError::InvalidConfig { message } => eprintln!("Config error: {}", message),
///     }
/// }
/// ```
#[derive(Debug)]
pub enum ChunkError {
    /// An I/O error occurred while reading input data.
    Io(std::io::Error),

    /// Invalid configuration parameter.
    ///
    /// This error is raised when the chunking configuration is invalid,
    /// such as:
    /// - A zero minimum chunk size
    /// - Minimum size greater than maximum size
    /// - A non-power-of-2 average size (required for mask derivation)
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::Io(e) => write!(f, "io error: {}", e),
            ChunkError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChunkError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChunkError {
    fn from(e: std::io::Error) -> Self {
        ChunkError::Io(e)
    }
}
