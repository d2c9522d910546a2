//! Error types for the booking-audit library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an audit before any check runs.
///
/// Problems confined to a single column or rule never surface here; those are
/// reported as [`SkipReason`](crate::findings::SkipReason)s inside the report.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no header to read columns from.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Columns of a table disagree on the number of rows.
    #[error("Table shape error: {0}")]
    Shape(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
