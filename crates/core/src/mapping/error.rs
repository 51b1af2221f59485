//! Error types for metadata projection

use thiserror::Error;

/// Errors that abort a whole projection run
///
/// Per-slot failures are not errors; they surface as diagnostics in the
/// projection report.
#[derive(Error, Debug)]
pub enum MappingError {
    /// The schema definition cannot be used
    #[error("invalid schema structure: {0}")]
    InvalidSchema(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for projection operations
pub type MappingResult<T> = Result<T, MappingError>;
