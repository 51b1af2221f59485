//! Path equivalence resolution
//!
//! Schema-side field names occasionally differ lexically from the names
//! the instrument writes (axis labels such as `phi(x)` vs `phi`). The
//! table rewrites a schema path to the source path it corresponds to,
//! with identity fallback and no transitive matching.

use std::collections::HashMap;

use super::types::MetadataPath;

/// Static rename map from schema paths to their source counterparts
#[derive(Debug, Clone, Default)]
pub struct EquivalenceTable {
    entries: HashMap<MetadataPath, MetadataPath>,
}

impl EquivalenceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rename
    pub fn insert(&mut self, schema_path: MetadataPath, source_path: MetadataPath) {
        self.entries.insert(schema_path, source_path);
    }

    /// Register a rename from slash-delimited paths
    pub fn with_entry(mut self, schema_path: &str, source_path: &str) -> Self {
        self.insert(
            MetadataPath::from_slash(schema_path),
            MetadataPath::from_slash(source_path),
        );
        self
    }

    /// Resolve a schema path to its source path
    ///
    /// Returns the mapped path when one is registered, the input
    /// otherwise.
    pub fn resolve<'a>(&'a self, path: &'a MetadataPath) -> &'a MetadataPath {
        self.entries.get(path).unwrap_or(path)
    }

    /// Number of registered renames
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no renames
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
