//! Projection orchestration
//!
//! Drives the full pipeline: classify the schema, synthesize the
//! gas-flux composite, extract the addressable destination paths, and
//! write every path that has source data. Failures stay per-path.

use std::collections::BTreeMap;

use serde_json::Value;

use super::config::ProjectionConfig;
use super::error::{MappingError, MappingResult};
use super::extractor::leaf_paths;
use super::gas_flux::synthesize_gas_flux;
use super::projector::{Projection, project_value};
use super::schema::SchemaNode;
use super::types::{
    Diagnostic, DiagnosticKind, FlatMetadata, MetadataPath, MetadataValue, ProjectionReport,
    ProjectionStats,
};

/// Projects flattened source metadata onto a schema definition
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self {
            config: ProjectionConfig::default(),
        }
    }

    /// Create an engine with a custom configuration
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project flattened metadata onto a schema definition
    ///
    /// The returned document has the schema's nested shape; slots without
    /// source data keep their placeholder values. Per-path failures are
    /// collected as diagnostics and never abort the run.
    pub fn project(
        &self,
        schema: &Value,
        metadata: &FlatMetadata,
    ) -> MappingResult<ProjectionReport> {
        if !schema.is_object() {
            return Err(MappingError::InvalidSchema(
                "schema root must be a JSON object".to_string(),
            ));
        }

        let mut tree = SchemaNode::classify(schema);
        let metadata = synthesize_gas_flux(metadata);
        let paths = leaf_paths(&tree);

        let mut diagnostics = Vec::new();
        let mut stats = ProjectionStats {
            schema_paths: paths.len(),
            ..ProjectionStats::default()
        };

        for path in &paths {
            let source_path = self.config.equivalencies.resolve(path);
            let Some(value) = metadata.get(source_path) else {
                stats.skipped += 1;
                continue;
            };
            stats.matched += 1;

            match write_slot(&mut tree, path, value, &self.config) {
                Ok(Projection::Written) => stats.written += 1,
                Ok(Projection::Skipped) => {}
                Err(diagnostic) => {
                    tracing::warn!(
                        path = %diagnostic.path,
                        kind = %diagnostic.kind,
                        "{}", diagnostic.message
                    );
                    diagnostics.push(diagnostic);
                }
            }
        }

        Ok(ProjectionReport {
            document: tree.to_json(),
            diagnostics,
            stats,
        })
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk to the terminal key of a destination path and project into it
///
/// Intermediate containers are created on demand; a non-container in the
/// way is a structural failure for this path only.
fn write_slot(
    root: &mut SchemaNode,
    path: &MetadataPath,
    value: &MetadataValue,
    config: &ProjectionConfig,
) -> Result<Projection, Diagnostic> {
    let Some((last, intermediate)) = path.segments().split_last() else {
        return Err(Diagnostic::new(
            path.clone(),
            DiagnosticKind::StructuralError,
            "empty destination path",
        ));
    };

    let mut node = root;
    for segment in intermediate {
        node = match node {
            SchemaNode::Container(children) => children
                .entry(segment.clone())
                .or_insert_with(|| SchemaNode::Container(BTreeMap::new())),
            _ => {
                return Err(Diagnostic::new(
                    path.clone(),
                    DiagnosticKind::StructuralError,
                    format!("segment {segment:?} is not a container"),
                ));
            }
        };
    }

    match node {
        SchemaNode::Container(children) => match children.get_mut(last) {
            Some(slot) => project_value(slot, last, value, path, config),
            None => Err(Diagnostic::new(
                path.clone(),
                DiagnosticKind::StructuralError,
                format!("terminal key {last:?} is missing from the destination"),
            )),
        },
        _ => Err(Diagnostic::new(
            path.clone(),
            DiagnosticKind::StructuralError,
            format!("parent of terminal key {last:?} is not a container"),
        )),
    }
}
