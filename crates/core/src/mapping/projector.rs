//! Slot-shape dispatch for writing source values into the schema tree
//!
//! Decision order, first match wins: placeholder overwrite, value/unit
//! slot, min/max/average aggregate, gas-flux composite, diagnostic. A
//! failed write returns its diagnostic and leaves the slot untouched;
//! it never aborts other paths.

use serde_json::{Map, Value};

use super::config::ProjectionConfig;
use super::schema::{GAS_FLUX_KEY, SchemaNode};
use super::types::{
    Diagnostic, DiagnosticKind, GasFluxRecord, MetadataPath, MetadataValue, json_number,
};

/// Outcome of a single slot write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// The slot was written
    Written,
    /// Nothing to write (empty aggregate source); not an error
    Skipped,
}

/// Write a source value into a destination slot
///
/// `key` is the terminal key the slot sits under; it selects the
/// composite gas-flux rule. The slot is modified only on success.
pub fn project_value(
    slot: &mut SchemaNode,
    key: &str,
    source: &MetadataValue,
    path: &MetadataPath,
    config: &ProjectionConfig,
) -> Result<Projection, Diagnostic> {
    if slot.is_placeholder() {
        *slot = SchemaNode::Leaf(source.to_json());
        return Ok(Projection::Written);
    }

    match slot {
        SchemaNode::ValueUnit(fields) => {
            let reading = value_slot_reading(source, path)?;
            fields.insert("value".to_string(), json_number(reading));
            Ok(Projection::Written)
        }
        SchemaNode::Aggregate(fields) => match source {
            MetadataValue::Array(readings) if readings.is_empty() => Ok(Projection::Skipped),
            MetadataValue::Array(readings) => {
                *fields = aggregate_fields(readings);
                Ok(Projection::Written)
            }
            other => Err(Diagnostic::new(
                path.clone(),
                DiagnosticKind::UnsupportedSourceType,
                format!(
                    "aggregate slot needs an array source, got {}",
                    other.type_name()
                ),
            )),
        },
        _ if key == GAS_FLUX_KEY => match source {
            MetadataValue::GasFlux(samples) => {
                let records = samples
                    .iter()
                    .map(|sample| GasFluxRecord {
                        value: sample.value,
                        unit: config.flux_unit.clone(),
                        gas_name: sample.gas_name.clone(),
                    })
                    .collect();
                *slot = SchemaNode::GasFluxRecords(records);
                Ok(Projection::Written)
            }
            other => Err(Diagnostic::new(
                path.clone(),
                DiagnosticKind::UnsupportedSourceType,
                format!(
                    "gas-flux slot needs synthesized samples, got {}",
                    other.type_name()
                ),
            )),
        },
        _ => Err(Diagnostic::new(
            path.clone(),
            DiagnosticKind::UnsupportedSourceType,
            format!(
                "no write rule for this slot shape and a {} source",
                source.type_name()
            ),
        )),
    }
}

/// Narrow a source value for a value/unit slot
///
/// Floats pass through, strings must parse, arrays contribute their most
/// recent reading.
fn value_slot_reading(source: &MetadataValue, path: &MetadataPath) -> Result<f64, Diagnostic> {
    match source {
        MetadataValue::Scalar(reading) => Ok(*reading),
        MetadataValue::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            Diagnostic::new(
                path.clone(),
                DiagnosticKind::ConversionError,
                format!("cannot parse {text:?} as a number"),
            )
        }),
        MetadataValue::Array(readings) => readings.last().copied().ok_or_else(|| {
            Diagnostic::new(
                path.clone(),
                DiagnosticKind::UnsupportedSourceType,
                "empty array for value slot",
            )
        }),
        other => Err(Diagnostic::new(
            path.clone(),
            DiagnosticKind::UnsupportedSourceType,
            format!("unsupported source type {} for value slot", other.type_name()),
        )),
    }
}

/// Compute the aggregate fields for a non-empty series
///
/// NaN readings are excluded from the extrema; the average is the
/// midrange `(min + max) / 2`, the domain's operating-range convention.
/// Results are rounded to 3 decimals, except NaN which stays NaN.
fn aggregate_fields(readings: &[f64]) -> Map<String, Value> {
    let min = nan_fold(readings, f64::min);
    let max = nan_fold(readings, f64::max);
    let average = (min + max) / 2.0;

    let mut fields = Map::new();
    fields.insert("min_value".to_string(), json_number(round3(min)));
    fields.insert("max_value".to_string(), json_number(round3(max)));
    fields.insert("average_value".to_string(), json_number(round3(average)));
    fields
}

/// Reduce the non-NaN readings; NaN when none remain
fn nan_fold(readings: &[f64], op: fn(f64, f64) -> f64) -> f64 {
    readings
        .iter()
        .copied()
        .filter(|reading| !reading.is_nan())
        .fold(f64::NAN, op)
}

fn round3(value: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        (value * 1000.0).round() / 1000.0
    }
}
