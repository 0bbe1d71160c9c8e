//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;
use std::path::Path;

use coffer_core::CofferError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, container file)
    NotFound { message: String, hint: String },

    /// Authentication failed (the key does not decode the container)
    AuthFailed { message: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Maps a core error raised while loading a container into a typed CLI
/// error: a missing file is NotFound, an undecodable one is AuthFailed.
pub fn map_load_error(err: CofferError, path: &Path) -> anyhow::Error {
    match err {
        CofferError::Io { source } => anyhow::Error::new(CliError::not_found(
            format!("Cannot read container {}: {}", path.display(), source),
            "Hint: run `coffer init` to create one, or pass --container.",
        )),
        CofferError::Decode(message) => anyhow::Error::new(CliError::auth_failed(format!(
            "The key does not decode this container ({})",
            message
        ))),
        CofferError::InvalidInput(message) => {
            anyhow::Error::new(CliError::InvalidInput(message))
        }
    }
}
