//! Configuration for metadata projection

use super::equivalence::EquivalenceTable;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Schema-to-source path renames applied before source lookup
    pub equivalencies: EquivalenceTable,
    /// Unit attached to synthesized gas-flux records
    pub flux_unit: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        // the goniometer axis labels differ between schema and source
        let equivalencies = EquivalenceTable::new()
            .with_entry(
                "entry/sample/transformations/phi(x)",
                "entry/sample/transformations/phi",
            )
            .with_entry(
                "entry/sample/transformations/theta(z)",
                "entry/sample/transformations/theta",
            );

        Self {
            equivalencies,
            flux_unit: "ml/min".to_string(),
        }
    }
}

impl ProjectionConfig {
    /// Create a config with the default equivalencies and flux unit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with no equivalence renames
    pub fn bare() -> Self {
        Self {
            equivalencies: EquivalenceTable::new(),
            flux_unit: "ml/min".to_string(),
        }
    }

    /// Register an additional equivalence rename
    pub fn with_equivalence(mut self, schema_path: &str, source_path: &str) -> Self {
        self.equivalencies = self.equivalencies.with_entry(schema_path, source_path);
        self
    }

    /// Set the unit attached to gas-flux records
    pub fn with_flux_unit(mut self, unit: impl Into<String>) -> Self {
        self.flux_unit = unit.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MetadataPath;

    #[test]
    fn test_default_config() {
        let config = ProjectionConfig::default();
        assert_eq!(config.flux_unit, "ml/min");
        assert_eq!(config.equivalencies.len(), 2);

        let phi = MetadataPath::from_slash("entry/sample/transformations/phi(x)");
        assert_eq!(
            config.equivalencies.resolve(&phi).to_string(),
            "entry/sample/transformations/phi"
        );
    }

    #[test]
    fn test_builder() {
        let config = ProjectionConfig::bare()
            .with_equivalence("entry/a", "entry/b")
            .with_flux_unit("l/h");

        assert_eq!(config.flux_unit, "l/h");
        assert_eq!(config.equivalencies.len(), 1);
    }
}
