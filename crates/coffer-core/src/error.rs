//! Error types for Coffer core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps them
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Coffer operations.
pub type Result<T> = std::result::Result<T, CofferError>;

/// Core error type for Coffer operations.
#[derive(Debug, Error)]
pub enum CofferError {
    /// Invalid parameter or record data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Wire text that does not decode with the current key and offset
    #[error("Decode error: {0}")]
    Decode(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
