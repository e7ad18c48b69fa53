//! Session storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by session storage and sample generation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Session id contains characters outside `[A-Za-z0-9_-]` or is empty.
    #[error("invalid session id '{id}'")]
    InvalidId { id: String },

    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for SessionError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
