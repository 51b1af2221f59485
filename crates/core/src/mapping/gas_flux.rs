//! Gas-flux synthesis
//!
//! Instrument files report gas flows as individual flat fields whose
//! names carry the gas (`…/gas_flux_Ar`, `…/gas_flux_He`). Projection
//! wants them as one composite list, so the flat entries are gathered
//! into samples and injected under a fixed destination path before any
//! slot is written.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{FlatMetadata, GasFluxSample, MetadataPath, MetadataValue};

/// Fixed destination path of the synthesized composite entry
pub const GAS_FLUX_DESTINATION: &str = "entry/sample/gas_flux";

static GAS_FLUX_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("gas_flux").unwrap());

/// Gather per-gas flux fields into a single composite entry
///
/// Pure function: returns the metadata with exactly one additional entry
/// at `entry/sample/gas_flux`. The accumulator follows the source's
/// iteration order and is injected even when no field matched (empty
/// list). The gas name is the token after the final underscore of the
/// matching segment.
pub fn synthesize_gas_flux(metadata: &FlatMetadata) -> FlatMetadata {
    let mut samples = Vec::new();

    for (path, value) in metadata.iter() {
        let Some(last) = path.last() else { continue };
        if !GAS_FLUX_PATTERN.is_match(last) {
            continue;
        }

        let gas_name = last.rsplit('_').next().unwrap_or(last).to_string();
        match flux_reading(value) {
            Some(reading) => samples.push(GasFluxSample {
                value: reading,
                gas_name,
            }),
            None => {
                tracing::warn!(path = %path, "gas-flux field has no usable reading");
            }
        }
    }

    let mut out = metadata.clone();
    out.insert(
        MetadataPath::from_slash(GAS_FLUX_DESTINATION),
        MetadataValue::GasFlux(samples),
    );
    out
}

/// Narrow a raw source value to a single flux reading
///
/// Arrays contribute their most recent reading; parseable text is
/// accepted the way value slots accept it.
fn flux_reading(value: &MetadataValue) -> Option<f64> {
    match value {
        MetadataValue::Scalar(reading) => Some(*reading),
        MetadataValue::Array(readings) => readings.last().copied(),
        MetadataValue::Text(text) => text.trim().parse().ok(),
        MetadataValue::GasFlux(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destination() -> MetadataPath {
        MetadataPath::from_slash(GAS_FLUX_DESTINATION)
    }

    #[test]
    fn test_synthesis_follows_source_order() {
        let metadata = FlatMetadata::from_slash_keys([
            (
                "entry/sample/gas_flux_Ar".to_string(),
                MetadataValue::Scalar(12.5),
            ),
            (
                "entry/sample/gas_flux_He".to_string(),
                MetadataValue::Scalar(3.2),
            ),
        ]);

        let out = synthesize_gas_flux(&metadata);
        let Some(MetadataValue::GasFlux(samples)) = out.get(&destination()) else {
            panic!("expected synthesized gas flux entry");
        };
        assert_eq!(
            samples,
            &[
                GasFluxSample {
                    value: 12.5,
                    gas_name: "Ar".to_string()
                },
                GasFluxSample {
                    value: 3.2,
                    gas_name: "He".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_destination_always_present() {
        let metadata = FlatMetadata::from_slash_keys([(
            "entry/title".to_string(),
            MetadataValue::Text("scan".into()),
        )]);

        let out = synthesize_gas_flux(&metadata);
        assert_eq!(
            out.get(&destination()),
            Some(&MetadataValue::GasFlux(Vec::new()))
        );
        // pure: the input is untouched
        assert!(!metadata.contains(&destination()));
    }

    #[test]
    fn test_array_contributes_last_reading() {
        let metadata = FlatMetadata::from_slash_keys([(
            "entry/instrument/gas_flux_N2".to_string(),
            MetadataValue::Array(vec![1.0, 2.0, 7.5]),
        )]);

        let out = synthesize_gas_flux(&metadata);
        let Some(MetadataValue::GasFlux(samples)) = out.get(&destination()) else {
            panic!("expected synthesized gas flux entry");
        };
        assert_eq!(samples[0].value, 7.5);
        assert_eq!(samples[0].gas_name, "N2");
    }

    #[test]
    fn test_text_reading_parses() {
        let metadata = FlatMetadata::from_slash_keys([(
            "entry/sample/gas_flux_O2".to_string(),
            MetadataValue::Text(" 4.25 ".into()),
        )]);

        let out = synthesize_gas_flux(&metadata);
        let Some(MetadataValue::GasFlux(samples)) = out.get(&destination()) else {
            panic!("expected synthesized gas flux entry");
        };
        assert_eq!(samples[0].value, 4.25);
    }

    #[test]
    fn test_unusable_reading_is_skipped() {
        let metadata = FlatMetadata::from_slash_keys([
            (
                "entry/sample/gas_flux_Ar".to_string(),
                MetadataValue::Text("off".into()),
            ),
            (
                "entry/sample/gas_flux_He".to_string(),
                MetadataValue::Scalar(3.2),
            ),
        ]);

        let out = synthesize_gas_flux(&metadata);
        let Some(MetadataValue::GasFlux(samples)) = out.get(&destination()) else {
            panic!("expected synthesized gas flux entry");
        };
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].gas_name, "He");
    }

    #[test]
    fn test_gas_name_is_last_underscore_token() {
        let metadata = FlatMetadata::from_slash_keys([(
            "entry/aux/carrier_gas_flux_CO2".to_string(),
            MetadataValue::Scalar(0.5),
        )]);

        let out = synthesize_gas_flux(&metadata);
        let Some(MetadataValue::GasFlux(samples)) = out.get(&destination()) else {
            panic!("expected synthesized gas flux entry");
        };
        assert_eq!(samples[0].gas_name, "CO2");
    }
}
