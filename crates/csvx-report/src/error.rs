//! Error types for reporting and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while summarizing or rendering a table.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Explorer configuration file could not be read.
    #[error("failed to read explorer config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Explorer configuration file is not valid JSON.
    #[error("invalid explorer config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Payload serialization failed.
    #[error("failed to serialize explorer payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ReportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;
