//! Flattened-metadata import
//!
//! Reads the flattened JSON dumps the NeXus container reader produces
//! and decodes them into [`FlatMetadata`]. Nested objects are flattened
//! to slash-delimited paths; zip archives holding several dumps are read
//! entry by entry so one bad entry never takes down its siblings.
//! Decoding the binary container itself is not this crate's job.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::mapping::{FlatMetadata, MetadataPath, MetadataValue};

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Archive error
    #[error("archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    /// The metadata root is not an object
    #[error("metadata root must be a JSON object")]
    NotAnObject,
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// One entry read from a metadata archive
///
/// Failures stay per-entry; callers decide whether to report or skip.
#[derive(Debug)]
pub struct ArchiveEntry {
    /// Entry file name without its extension
    pub name: String,
    /// The decoded metadata, or why this entry failed
    pub metadata: ImportResult<FlatMetadata>,
}

/// Read and decode a single flattened-metadata dump
pub fn read_metadata_file(path: &Path) -> ImportResult<FlatMetadata> {
    let text = std::fs::read_to_string(path)?;
    parse_metadata(&text)
}

/// Decode a flattened-metadata dump from JSON text
pub fn parse_metadata(text: &str) -> ImportResult<FlatMetadata> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(ImportError::NotAnObject);
    };
    Ok(flatten_object(&map))
}

/// Flatten a metadata object into slash-delimited paths
///
/// Keys are trimmed of surrounding whitespace; nested objects extend the
/// path, everything else decodes in place. Keys that already contain
/// slashes split into the same path segments, so pre-flattened dumps and
/// nested dumps produce identical results.
pub fn flatten_object(map: &Map<String, Value>) -> FlatMetadata {
    let mut metadata = FlatMetadata::new();
    for (key, value) in map {
        flatten_into(key.trim(), value, &mut metadata);
    }
    metadata
}

fn flatten_into(prefix: &str, value: &Value, out: &mut FlatMetadata) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(&format!("{prefix}/{}", key.trim()), child, out);
            }
        }
        other => match decode_value(other) {
            Some(decoded) => out.insert(MetadataPath::from_slash(prefix), decoded),
            None => {
                tracing::warn!(
                    path = prefix,
                    "skipping value that is not a string, number, or numeric array"
                );
            }
        },
    }
}

/// Decode a JSON leaf into a metadata value
///
/// Array elements must be numbers; `null` elements stand for missing
/// readings and decode to NaN.
fn decode_value(value: &Value) -> Option<MetadataValue> {
    match value {
        Value::String(text) => Some(MetadataValue::Text(text.clone())),
        Value::Number(number) => number.as_f64().map(MetadataValue::Scalar),
        Value::Array(items) => {
            let mut readings = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Number(number) => readings.push(number.as_f64()?),
                    Value::Null => readings.push(f64::NAN),
                    _ => return None,
                }
            }
            Some(MetadataValue::Array(readings))
        }
        _ => None,
    }
}

/// Check a file's magic bytes for a zip container
pub fn is_zip_file(path: &Path) -> ImportResult<bool> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(&magic == b"PK\x03\x04"),
        Err(error) if error.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(error) => Err(error.into()),
    }
}

/// Read every metadata dump contained in a zip archive
///
/// Directories, `__MACOSX` junk, and non-JSON entries are skipped. A
/// single undecodable entry is reported in place and never aborts its
/// siblings.
pub fn read_metadata_archive(path: &Path) -> ImportResult<Vec<ArchiveEntry>> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(error) => {
                entries.push(ArchiveEntry {
                    name: format!("entry #{index}"),
                    metadata: Err(error.into()),
                });
                continue;
            }
        };

        if !entry.is_file() || entry.name().contains("__MACOSX") {
            continue;
        }
        let entry_path = Path::new(entry.name());
        if entry_path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let name = entry_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.name().to_string());

        tracing::info!(entry = %name, "reading archive entry");
        let mut text = String::new();
        let metadata = match entry.read_to_string(&mut text) {
            Ok(_) => parse_metadata(&text),
            Err(error) => Err(ImportError::IoError(error)),
        };
        entries.push(ArchiveEntry { name, metadata });
    }

    Ok(entries)
}
