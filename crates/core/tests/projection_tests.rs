//! End-to-end projection tests

use nexus_mapping_core::{ProjectionEngine, import, project_metadata};
use serde_json::json;

fn instrument_schema() -> serde_json::Value {
    json!({
        "entry": {
            "title": "",
            "run_number": -9999,
            "instrument": {
                "beam_energy": {"value": -9999, "unit": "eV"}
            },
            "sample": {
                "name": "",
                "temperature": {
                    "min_value": -9999, "max_value": -9999, "average_value": -9999
                },
                "gas_flux": [{"value": "", "unit": "ml/min", "gas_name": ""}],
                "transformations": {
                    "phi(x)": {"value": -9999, "unit": "deg"},
                    "theta(z)": {"value": -9999, "unit": "deg"}
                }
            }
        }
    })
}

mod full_projection_tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let metadata = import::parse_metadata(
            r#"{
                "entry/title": "APE-HE scan",
                "entry/run_number": 1204.0,
                "entry/instrument/beam_energy": "708.2",
                "entry/sample/name": "Fe3O4 film",
                "entry/sample/temperature": [77.0, 81.5, 79.2],
                "entry/sample/gas_flux_Ar": 12.5,
                "entry/sample/gas_flux_He": 3.2,
                "entry/sample/transformations/phi": 45.0,
                "entry/sample/transformations/theta": 12.0
            }"#,
        )
        .unwrap();

        let report = project_metadata(&instrument_schema(), &metadata).unwrap();
        assert!(report.diagnostics.is_empty());

        let document = &report.document;
        assert_eq!(document["entry"]["title"], json!("APE-HE scan"));
        assert_eq!(document["entry"]["run_number"], json!(1204.0));
        assert_eq!(
            document["entry"]["instrument"]["beam_energy"],
            json!({"value": 708.2, "unit": "eV"})
        );
        assert_eq!(
            document["entry"]["sample"]["temperature"],
            json!({"min_value": 77.0, "max_value": 81.5, "average_value": 79.25})
        );
        // gas order follows the source's iteration order
        assert_eq!(
            document["entry"]["sample"]["gas_flux"],
            json!([
                {"value": 12.5, "unit": "ml/min", "gas_name": "Ar"},
                {"value": 3.2, "unit": "ml/min", "gas_name": "He"}
            ])
        );
        // axis labels resolve through the equivalence table
        assert_eq!(
            document["entry"]["sample"]["transformations"]["phi(x)"]["value"],
            json!(45.0)
        );
        assert_eq!(
            document["entry"]["sample"]["transformations"]["theta(z)"]["value"],
            json!(12.0)
        );
    }

    #[test]
    fn test_sparse_source_leaves_placeholders() {
        let metadata =
            import::parse_metadata(r#"{"entry/title": "only a title"}"#).unwrap();

        let report = project_metadata(&instrument_schema(), &metadata).unwrap();

        assert_eq!(report.document["entry"]["title"], json!("only a title"));
        assert_eq!(report.document["entry"]["run_number"], json!(-9999));
        assert_eq!(
            report.document["entry"]["instrument"]["beam_energy"]["value"],
            json!(-9999)
        );
        // gas flux is always synthesized, so its slot is written (empty)
        assert_eq!(report.document["entry"]["sample"]["gas_flux"], json!([]));
        assert_eq!(report.stats.written, 2);
    }

    #[test]
    fn test_document_shape_matches_schema() {
        let metadata = import::parse_metadata(r#"{"entry/title": "t"}"#).unwrap();
        let schema = instrument_schema();
        let report = project_metadata(&schema, &metadata).unwrap();

        fn shape(value: &serde_json::Value) -> serde_json::Value {
            match value {
                serde_json::Value::Object(map) => serde_json::Value::Object(
                    map.iter().map(|(k, v)| (k.clone(), shape(v))).collect(),
                ),
                _ => json!(null),
            }
        }
        // no top-level or nested container keys appear or vanish
        assert_eq!(shape(&report.document), shape(&schema));
    }

    #[test]
    fn test_conversion_failure_is_isolated() {
        let metadata = import::parse_metadata(
            r#"{
                "entry/instrument/beam_energy": "seven hundred",
                "entry/title": "still fine"
            }"#,
        )
        .unwrap();

        let report = project_metadata(&instrument_schema(), &metadata).unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.document["entry"]["title"], json!("still fine"));
        assert_eq!(
            report.document["entry"]["instrument"]["beam_energy"]["value"],
            json!(-9999)
        );
    }

    #[test]
    fn test_custom_equivalence() {
        use nexus_mapping_core::ProjectionConfig;

        let schema = json!({"entry": {"energy(calibrated)": {"value": -9999, "unit": "eV"}}});
        let metadata = import::parse_metadata(r#"{"entry/energy": 21.2}"#).unwrap();

        let engine = ProjectionEngine::with_config(
            ProjectionConfig::bare().with_equivalence("entry/energy(calibrated)", "entry/energy"),
        );
        let report = engine.project(&schema, &metadata).unwrap();
        assert_eq!(
            report.document["entry"]["energy(calibrated)"]["value"],
            json!(21.2)
        );
    }
}
