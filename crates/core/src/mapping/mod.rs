//! Metadata projection module for populating schema documents from
//! flattened instrument metadata
//!
//! This module provides functionality to:
//! - Classify a JSON schema definition into typed value slots
//! - Extract the addressable leaf paths of a schema tree
//! - Synthesize composite gas-flux records from flat per-gas fields
//! - Resolve known field-naming mismatches between schema and source
//! - Write source values into matching slots (scalar, value/unit,
//!   min/max/average aggregate, gas-flux list)
//!
//! # Example
//!
//! ```rust,ignore
//! use nexus_mapping_core::mapping::{FlatMetadata, MetadataValue, project_metadata};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "entry": {
//!         "title": "",
//!         "sample": {
//!             "temperature": {"value": -9999, "unit": "K"}
//!         }
//!     }
//! });
//!
//! let metadata = FlatMetadata::from_slash_keys([
//!     ("entry/title".to_string(), MetadataValue::Text("scan 42".into())),
//!     ("entry/sample/temperature".to_string(), MetadataValue::Scalar(295.4)),
//! ]);
//!
//! let report = project_metadata(&schema, &metadata)?;
//! println!("{} of {} slots written", report.stats.written, report.stats.schema_paths);
//! ```

mod config;
mod engine;
mod equivalence;
mod error;
mod extractor;
mod gas_flux;
mod projector;
mod schema;
mod types;

pub use config::ProjectionConfig;
pub use engine::ProjectionEngine;
pub use equivalence::EquivalenceTable;
pub use error::{MappingError, MappingResult};
pub use extractor::leaf_paths;
pub use gas_flux::{GAS_FLUX_DESTINATION, synthesize_gas_flux};
pub use projector::{Projection, project_value};
pub use schema::{GAS_FLUX_KEY, NUMERIC_PLACEHOLDER, SchemaNode, TERMINAL_MARKERS};
pub use types::{
    Diagnostic, DiagnosticKind, FlatMetadata, GasFluxRecord, GasFluxSample, MetadataPath,
    MetadataValue, ProjectionReport, ProjectionStats,
};

/// Project flattened metadata onto a schema definition with default
/// configuration
///
/// This is a convenience function for simple projection operations.
pub fn project_metadata(
    schema: &serde_json::Value,
    metadata: &FlatMetadata,
) -> MappingResult<ProjectionReport> {
    let engine = ProjectionEngine::new();
    engine.project(schema, metadata)
}
