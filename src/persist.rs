//! Disk I/O helpers: load from file and atomic write.
//!
//! Writes go to `<path>.tmp` in the same directory, get fsynced, and are then
//! renamed over `path`. A reader (or a restarted process) sees either the old
//! or the new file, never a torn one. On FAT32 or network shares rename gives
//! no hard guarantee.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::serializer::Serializer;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Reads and decodes the file at `path`.
///
/// Returns `Ok(None)` if the file doesn't exist. An empty, unreadable or
/// malformed file is a [`Error::StorageUnavailable`].
pub fn load<S: Serializer>(path: &Path, serializer: &S) -> Result<Option<Document>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::StorageUnavailable(format!(
                "{}: {e}",
                path.display()
            )))
        }
    };
    serializer
        .deserialize(&bytes)
        .map(Some)
        .map_err(|e| Error::StorageUnavailable(format!("{}: {e}", path.display())))
}

/// Temp file used while replacing `path`.
#[must_use]
pub fn temp_path(path: &Path) -> PathBuf {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    path.with_extension(format!("{ext}.tmp"))
}

/// Write `bytes` to the temp file, flush it to disk, then rename over `path`.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path(path);
    let failed = |stage: &str, e: std::io::Error| {
        Error::PersistenceFailed(format!("{stage} {}: {e}", tmp.display()))
    };

    let mut file = File::create(&tmp).map_err(|e| failed("create", e))?;
    file.write_all(bytes).map_err(|e| failed("write", e))?;
    file.sync_all().map_err(|e| failed("sync", e))?;
    drop(file);

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::PersistenceFailed(format!(
            "rename {} -> {}: {e}",
            tmp.display(),
            path.display()
        )));
    }
    sync_parent(path);
    Ok(())
}

// Makes the rename itself durable. Not every platform lets you open a
// directory for syncing, so failures are ignored.
#[cfg(unix)]
fn sync_parent(path: &Path) {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    if let Ok(d) = File::open(dir) {
        let _ = d.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) {}
