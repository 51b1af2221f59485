//! Document output
//!
//! Persists projected documents as pretty-printed JSON and bundles a
//! batch of them into a deflate zip archive. Intermediate files are
//! removed only after the archive is fully written.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Archive error
    #[error("archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Write a document as pretty-printed JSON
pub fn save_document(document: &Value, path: &Path) -> ExportResult<()> {
    let text = serde_json::to_string_pretty(document)?;
    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), "document written");
    Ok(())
}

/// Bundle documents into a deflate zip archive and remove the originals
///
/// Archive entries are named after each file's final path component. The
/// originals are deleted only once the archive has been finished, so a
/// failed bundle leaves them in place.
pub fn bundle_documents(paths: &[PathBuf], archive_path: &Path) -> ExportResult<()> {
    let file = File::create(archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in paths {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        writer.start_file(name, options)?;
        let bytes = std::fs::read(path)?;
        writer.write_all(&bytes)?;
    }
    writer.finish()?;
    tracing::info!(archive = %archive_path.display(), files = paths.len(), "documents bundled");

    for path in paths {
        std::fs::remove_file(path)?;
        tracing::debug!(path = %path.display(), "intermediate document removed");
    }
    Ok(())
}
