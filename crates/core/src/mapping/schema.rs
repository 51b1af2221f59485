//! Schema tree classification
//!
//! The schema definition arrives as free-form JSON. It is classified once
//! into a tagged tree so the projector can pattern-match on slot shape
//! instead of re-inspecting raw JSON at every write.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::types::{GasFluxRecord, json_number};

/// Reserved keys that mark a mapping as a terminal value slot
///
/// A path never continues past one of these; extraction truncates at the
/// marker's parent.
pub const TERMINAL_MARKERS: [&str; 5] =
    ["value", "unit", "min_value", "max_value", "average_value"];

/// Key whose slot receives the synthesized gas-flux records
pub const GAS_FLUX_KEY: &str = "gas_flux";

/// Sentinel placeholder for numeric scalar slots
pub const NUMERIC_PLACEHOLDER: f64 = -9999.0;

/// A node of the destination schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Nested mapping; traversal continues
    Container(BTreeMap<String, SchemaNode>),
    /// List of child nodes; items share their parent's path
    List(Vec<SchemaNode>),
    /// Plain terminal value: placeholders and already-written values
    Leaf(Value),
    /// Terminal mapping with a `value` entry, written in place
    ValueUnit(Map<String, Value>),
    /// Terminal mapping with `min_value`/`max_value`/`average_value`
    Aggregate(Map<String, Value>),
    /// Projected gas-flux records; produced only by the projector
    GasFluxRecords(Vec<GasFluxRecord>),
}

impl SchemaNode {
    /// Classify a loaded schema value into a tagged tree
    ///
    /// A mapping holding `value` is a value/unit slot, a mapping holding
    /// `min_value` (without `value`) is an aggregate slot; every other
    /// mapping keeps nesting.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                if map.contains_key("value") {
                    SchemaNode::ValueUnit(map.clone())
                } else if map.contains_key("min_value") {
                    SchemaNode::Aggregate(map.clone())
                } else {
                    SchemaNode::Container(
                        map.iter()
                            .map(|(key, child)| (key.clone(), SchemaNode::classify(child)))
                            .collect(),
                    )
                }
            }
            Value::Array(items) => SchemaNode::List(items.iter().map(SchemaNode::classify).collect()),
            other => SchemaNode::Leaf(other.clone()),
        }
    }

    /// Whether this node still holds a scalar placeholder (`""` or -9999)
    pub fn is_placeholder(&self) -> bool {
        match self {
            SchemaNode::Leaf(Value::String(text)) => text.is_empty(),
            SchemaNode::Leaf(Value::Number(number)) => {
                number.as_f64() == Some(NUMERIC_PLACEHOLDER)
            }
            _ => false,
        }
    }

    /// Serialize the tree back to JSON with the schema's nested shape
    pub fn to_json(&self) -> Value {
        match self {
            SchemaNode::Container(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_json()))
                    .collect(),
            ),
            SchemaNode::List(items) => {
                Value::Array(items.iter().map(SchemaNode::to_json).collect())
            }
            SchemaNode::Leaf(value) => value.clone(),
            SchemaNode::ValueUnit(fields) | SchemaNode::Aggregate(fields) => {
                Value::Object(fields.clone())
            }
            SchemaNode::GasFluxRecords(records) => Value::Array(
                records
                    .iter()
                    .map(|record| {
                        let mut fields = Map::new();
                        fields.insert("value".to_string(), json_number(record.value));
                        fields.insert("unit".to_string(), Value::String(record.unit.clone()));
                        fields
                            .insert("gas_name".to_string(), Value::String(record.gas_name.clone()));
                        Value::Object(fields)
                    })
                    .collect(),
            ),
        }
    }
}
