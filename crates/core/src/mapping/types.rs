//! Types for metadata paths, values, and projection results

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered sequence of key segments addressing a location in either the
/// source metadata tree or the schema tree
///
/// Source paths come from splitting slash-delimited strings; schema paths
/// come from key nesting. Equality is segment-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataPath(Vec<String>);

impl MetadataPath {
    /// Create an empty path (the tree root)
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a path from an iterator of segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Split a slash-delimited string into a path, ignoring empty segments
    pub fn from_slash(raw: &str) -> Self {
        Self(
            raw.split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// The path's segments in order
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment, if any
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path with its final segment removed
    pub fn parent(&self) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        Self(segments)
    }

    /// A new path extended by one segment
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MetadataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// A single reading contributed to the synthesized gas-flux list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasFluxSample {
    /// The flux reading
    pub value: f64,
    /// Gas identifier taken from the source field name
    pub gas_name: String,
}

/// One record of the projected gas-flux list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasFluxRecord {
    pub value: f64,
    pub unit: String,
    pub gas_name: String,
}

/// A raw value read from a flattened instrument file
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Free-form text
    Text(String),
    /// A single floating-point reading
    Scalar(f64),
    /// A homogeneous series of readings; may be empty
    Array(Vec<f64>),
    /// Synthesized composite gas-flux samples
    GasFlux(Vec<GasFluxSample>),
}

impl MetadataValue {
    /// The value's JSON form, used for wholesale placeholder overwrites
    ///
    /// Gas-flux samples render as raw `[value, gas_name]` pairs here; the
    /// record form with units is produced only by the composite slot
    /// write.
    pub fn to_json(&self) -> Value {
        match self {
            MetadataValue::Text(text) => Value::String(text.clone()),
            MetadataValue::Scalar(value) => json_number(*value),
            MetadataValue::Array(values) => {
                Value::Array(values.iter().map(|v| json_number(*v)).collect())
            }
            MetadataValue::GasFlux(samples) => Value::Array(
                samples
                    .iter()
                    .map(|s| {
                        Value::Array(vec![
                            json_number(s.value),
                            Value::String(s.gas_name.clone()),
                        ])
                    })
                    .collect(),
            ),
        }
    }

    /// Short type label for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            MetadataValue::Text(_) => "string",
            MetadataValue::Scalar(_) => "number",
            MetadataValue::Array(_) => "array",
            MetadataValue::GasFlux(_) => "gas-flux",
        }
    }
}

/// Render a float as a JSON number; NaN and infinities become `null`
pub(crate) fn json_number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Insertion-ordered flat mapping from metadata paths to raw values
///
/// Iteration order is the insertion order, which downstream consumers
/// rely on (the gas-flux accumulator follows it, and writes are applied
/// in it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMetadata {
    entries: Vec<(MetadataPath, MetadataValue)>,
}

impl FlatMetadata {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from slash-delimited keys
    pub fn from_slash_keys<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, MetadataValue)>,
    {
        let mut metadata = Self::new();
        for (key, value) in entries {
            metadata.insert(MetadataPath::from_slash(&key), value);
        }
        metadata
    }

    /// Insert a value, replacing an existing entry in place
    pub fn insert(&mut self, path: MetadataPath, value: MetadataValue) {
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((path, value)),
        }
    }

    /// Look up a value by path
    pub fn get(&self, path: &MetadataPath) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, v)| v)
    }

    /// Whether the mapping holds an entry for the path
    pub fn contains(&self, path: &MetadataPath) -> bool {
        self.get(path).is_some()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&MetadataPath, &MetadataValue)> {
        self.entries.iter().map(|(p, v)| (p, v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What went wrong while projecting a single path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Schema path whose projection was abandoned
    pub path: MetadataPath,
    /// Failure category
    pub kind: DiagnosticKind,
    /// Human-readable detail
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(path: MetadataPath, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

/// Category of a projection diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Source value's type matches no recognized slot shape
    UnsupportedSourceType,
    /// A string source could not be parsed as a number
    ConversionError,
    /// An intermediate path segment is not a container
    StructuralError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnsupportedSourceType => write!(f, "unsupported_source_type"),
            DiagnosticKind::ConversionError => write!(f, "conversion_error"),
            DiagnosticKind::StructuralError => write!(f, "structural_error"),
        }
    }
}

/// Result of projecting metadata onto a schema
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    /// The populated document, same nested shape as the schema
    pub document: Value,
    /// Per-path failures; never abort the projection
    pub diagnostics: Vec<Diagnostic>,
    /// Summary statistics
    pub stats: ProjectionStats,
}

/// Statistics about a projection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionStats {
    /// Addressable leaf paths in the schema
    pub schema_paths: usize,
    /// Paths with source data after equivalence resolution
    pub matched: usize,
    /// Slots actually written
    pub written: usize,
    /// Paths left at their placeholder (no source data)
    pub skipped: usize,
}

impl ProjectionStats {
    /// Fraction of schema paths that received a value
    pub fn coverage(&self) -> f64 {
        if self.schema_paths == 0 {
            return 1.0;
        }
        self.written as f64 / self.schema_paths as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_slash() {
        let path = MetadataPath::from_slash("entry/sample/temperature");
        assert_eq!(path.segments(), ["entry", "sample", "temperature"]);
        assert_eq!(path.last(), Some("temperature"));
        assert_eq!(path.to_string(), "entry/sample/temperature");
    }

    #[test]
    fn test_path_ignores_empty_segments() {
        let path = MetadataPath::from_slash("/entry//title/");
        assert_eq!(path.segments(), ["entry", "title"]);
    }

    #[test]
    fn test_path_parent_and_child() {
        let path = MetadataPath::from_slash("entry/sample");
        assert_eq!(path.child("gas_flux").to_string(), "entry/sample/gas_flux");
        assert_eq!(path.parent().to_string(), "entry");
        assert!(MetadataPath::new().parent().is_empty());
    }

    #[test]
    fn test_flat_metadata_preserves_insertion_order() {
        let mut metadata = FlatMetadata::new();
        metadata.insert(
            MetadataPath::from_slash("b/second"),
            MetadataValue::Scalar(2.0),
        );
        metadata.insert(
            MetadataPath::from_slash("a/first"),
            MetadataValue::Scalar(1.0),
        );

        let keys: Vec<String> = metadata.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(keys, ["b/second", "a/first"]);
    }

    #[test]
    fn test_flat_metadata_replace_keeps_position() {
        let mut metadata = FlatMetadata::new();
        metadata.insert(MetadataPath::from_slash("a"), MetadataValue::Scalar(1.0));
        metadata.insert(MetadataPath::from_slash("b"), MetadataValue::Scalar(2.0));
        metadata.insert(MetadataPath::from_slash("a"), MetadataValue::Scalar(3.0));

        assert_eq!(metadata.len(), 2);
        assert_eq!(
            metadata.get(&MetadataPath::from_slash("a")),
            Some(&MetadataValue::Scalar(3.0))
        );
        let keys: Vec<String> = metadata.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_value_to_json() {
        assert_eq!(
            MetadataValue::Text("abc".into()).to_json(),
            Value::String("abc".into())
        );
        assert_eq!(MetadataValue::Scalar(1.5).to_json(), serde_json::json!(1.5));
        assert_eq!(
            MetadataValue::Array(vec![1.0, 2.0]).to_json(),
            serde_json::json!([1.0, 2.0])
        );
        // NaN has no JSON number form
        assert_eq!(MetadataValue::Scalar(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_stats_coverage() {
        let stats = ProjectionStats {
            schema_paths: 8,
            matched: 7,
            written: 6,
            skipped: 1,
        };
        assert!((stats.coverage() - 0.75).abs() < 1e-9);
        assert_eq!(ProjectionStats::default().coverage(), 1.0);
    }
}
