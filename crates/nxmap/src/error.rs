//! CLI error types

use thiserror::Error;

use nexus_mapping_core::{ExportError, ImportError, MappingError};

/// Errors that end an nxmap invocation
#[derive(Debug, Error)]
pub enum CliError {
    /// The schema file could not be loaded
    #[error("schema error: {0}")]
    SchemaError(String),

    /// The metadata input could not be used
    #[error("input error: {0}")]
    InputError(String),

    /// Import failure
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Projection failure
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Export failure
    #[error(transparent)]
    Export(#[from] ExportError),
}
