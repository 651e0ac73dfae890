//! Reading and atomically replacing the registry document.

use std::io::Write;
use std::path::Path;

use medscan_core::errors::{MedscanResult, PersistenceError};
use medscan_core::models::RegistryDocument;
use tempfile::NamedTempFile;

/// Outcome of reading the stored document.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(RegistryDocument),
    Missing,
    /// The file exists but cannot be used; carries the reason.
    Unusable(String),
}

/// Read and validate the document at `path`.
///
/// Only I/O on an existing file is reported through `LoadOutcome::Unusable`;
/// nothing here returns an error, so the caller decides how to recover.
pub fn load_document(path: &Path) -> LoadOutcome {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return LoadOutcome::Missing,
        Err(e) => return LoadOutcome::Unusable(format!("read failed: {e}")),
    };
    let doc: RegistryDocument = match serde_json::from_slice(&bytes) {
        Ok(doc) => doc,
        Err(e) => return LoadOutcome::Unusable(format!("parse failed: {e}")),
    };
    match doc.validate() {
        Ok(()) => LoadOutcome::Loaded(doc),
        Err(reason) => LoadOutcome::Unusable(reason),
    }
}

/// Serialize the document the way it is stored on disk.
pub fn to_bytes(doc: &RegistryDocument) -> MedscanResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(doc).map_err(PersistenceError::from)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `doc` to `path` via a staging file in the same directory and an
/// atomic rename over the target.
pub fn save_document(path: &Path, doc: &RegistryDocument) -> MedscanResult<()> {
    let bytes = to_bytes(doc)?;
    let write_failed = |reason: String| PersistenceError::WriteFailed {
        path: path.display().to_string(),
        reason,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| write_failed(e.to_string()))?;

    let mut staging = NamedTempFile::new_in(dir).map_err(|e| write_failed(e.to_string()))?;
    staging
        .write_all(&bytes)
        .map_err(|e| write_failed(e.to_string()))?;
    staging
        .as_file()
        .sync_all()
        .map_err(|e| write_failed(e.to_string()))?;
    staging
        .persist(path)
        .map_err(|e| write_failed(e.error.to_string()))?;
    Ok(())
}
