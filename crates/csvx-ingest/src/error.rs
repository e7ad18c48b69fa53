//! Error types for CSV loading.

use thiserror::Error;

/// Classification of a failed load.
///
/// All three kinds are terminal for the current request: the caller shows
/// the message and waits for a corrected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stream held no parsable content.
    EmptyInput,
    /// The CSV structure was rejected (for example ragged rows).
    ParseFailure,
    /// Anything else: I/O, encoding, dataframe construction.
    Unexpected,
}

/// Errors that can occur while loading a CSV stream.
///
/// The `Display` output is the user-facing message.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Stream is empty, blank, or holds only a byte order mark.
    #[error("The uploaded file is empty.")]
    EmptyInput,

    /// CSV structure could not be parsed.
    #[error("Error parsing CSV file: {detail}")]
    ParseFailure { detail: String },

    /// Any other failure surfaced while reading or building the table.
    #[error("Unexpected error loading file: {detail}")]
    Unexpected { detail: String },
}

impl IngestError {
    /// Creates a parse failure from any displayable detail.
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::ParseFailure {
            detail: detail.into(),
        }
    }

    /// Creates an unexpected failure from any displayable detail.
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected {
            detail: detail.into(),
        }
    }

    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::ParseFailure { .. } => ErrorKind::ParseFailure,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths { .. } => Self::parse(err.to_string()),
            _ => Self::unexpected(err.to_string()),
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::unexpected(err.to_string())
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string())
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            IngestError::EmptyInput.to_string(),
            "The uploaded file is empty."
        );
        assert_eq!(
            IngestError::parse("Expected 3 fields in line 3, saw 4").to_string(),
            "Error parsing CSV file: Expected 3 fields in line 3, saw 4"
        );
        assert_eq!(
            IngestError::unexpected("boom").to_string(),
            "Unexpected error loading file: boom"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(IngestError::EmptyInput.kind(), ErrorKind::EmptyInput);
        assert_eq!(IngestError::parse("x").kind(), ErrorKind::ParseFailure);
        assert_eq!(IngestError::unexpected("x").kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert_eq!(ingest_err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::other("disk on fire");
        let ingest_err: IngestError = io_err.into();
        assert!(ingest_err.to_string().contains("disk on fire"));
    }
}
