//! NeXus Mapping Core - projecting flattened instrument metadata onto
//! schema-shaped JSON documents
//!
//! Provides unified interfaces for:
//! - Schema classification and leaf-path extraction
//! - Metadata projection (equivalence renames, gas-flux synthesis,
//!   slot-shape writes)
//! - Import of flattened metadata dumps (single files and zip batches)
//! - Export of projected documents (single files and bundled archives)

pub mod export;
pub mod import;
pub mod mapping;

// Re-export commonly used types
pub use export::{ExportError, ExportResult, bundle_documents, save_document};
pub use import::{
    ArchiveEntry, ImportError, ImportResult, is_zip_file, read_metadata_archive,
    read_metadata_file,
};
pub use mapping::{
    Diagnostic, DiagnosticKind, EquivalenceTable, FlatMetadata, GasFluxRecord, GasFluxSample,
    MappingError, MappingResult, MetadataPath, MetadataValue, ProjectionConfig, ProjectionEngine,
    ProjectionReport, ProjectionStats, SchemaNode, leaf_paths, project_metadata,
    synthesize_gas_flux,
};
