//! The `convert` operation: schema + flattened metadata → document(s)

use std::path::{Path, PathBuf};

use nexus_mapping_core::{
    ProjectionEngine, bundle_documents, is_zip_file, read_metadata_archive, read_metadata_file,
    save_document,
};

use crate::error::CliError;
use crate::output;

/// Arguments for the convert operation
pub struct ConvertArgs {
    /// Schema definition file
    pub schema: PathBuf,
    /// Metadata input: a JSON dump or a zip archive of dumps
    pub input: PathBuf,
    /// Output document or bundle path
    pub output: PathBuf,
    /// Print every projection diagnostic
    pub verbose: bool,
}

/// Run the conversion
///
/// A zip input becomes a bundle of per-entry documents; a plain input
/// becomes a single document. Per-entry failures in a batch are reported
/// and skipped.
pub fn handle_convert(args: &ConvertArgs) -> Result<(), CliError> {
    let schema = load_schema(&args.schema)?;
    let engine = ProjectionEngine::new();

    if is_zip_file(&args.input)? {
        convert_batch(args, &schema, &engine)
    } else {
        convert_single(args, &schema, &engine)
    }
}

fn load_schema(path: &Path) -> Result<serde_json::Value, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|error| CliError::SchemaError(format!("failed to read {}: {error}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|error| CliError::SchemaError(format!("failed to parse {}: {error}", path.display())))
}

fn convert_single(
    args: &ConvertArgs,
    schema: &serde_json::Value,
    engine: &ProjectionEngine,
) -> Result<(), CliError> {
    let metadata = read_metadata_file(&args.input)?;
    let report = engine.project(schema, &metadata)?;
    save_document(&report.document, &args.output)?;

    let name = args.input.display().to_string();
    output::print_summary(&name, &report, args.verbose);
    eprintln!("Document written to {}", args.output.display());
    Ok(())
}

fn convert_batch(
    args: &ConvertArgs,
    schema: &serde_json::Value,
    engine: &ProjectionEngine,
) -> Result<(), CliError> {
    let entries = read_metadata_archive(&args.input)?;
    if entries.is_empty() {
        return Err(CliError::InputError(format!(
            "{} holds no metadata dumps",
            args.input.display()
        )));
    }

    // intermediates land next to the bundle and are removed after it
    let staging_dir = args.output.parent().unwrap_or_else(|| Path::new("."));

    let mut written = Vec::new();
    for entry in entries {
        let metadata = match entry.metadata {
            Ok(metadata) => metadata,
            Err(error) => {
                eprintln!("{}: skipped ({error})", entry.name);
                continue;
            }
        };
        match engine.project(schema, &metadata) {
            Ok(report) => {
                let path = staging_dir.join(format!("{}.json", entry.name));
                save_document(&report.document, &path)?;
                output::print_summary(&entry.name, &report, args.verbose);
                written.push(path);
            }
            Err(error) => eprintln!("{}: projection failed ({error})", entry.name),
        }
    }

    if written.is_empty() {
        return Err(CliError::InputError(
            "no archive entry produced a document".to_string(),
        ));
    }
    let count = written.len();
    bundle_documents(&written, &args.output)?;
    eprintln!();
    eprintln!("{count} documents bundled into {}", args.output.display());
    Ok(())
}
