//! Atomic output writes
//!
//! Every command produces exactly one file. The content is written to a
//! temporary file in the destination directory and renamed over the target
//! only once complete, so a failed run leaves any existing file untouched.

use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write `contents` to `path`, replacing any existing file
///
/// Missing parent directories are created. Returns the number of bytes
/// written.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<u64> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(directory).map_err(|e| {
        Error::io(
            format!("Failed to create output directory {}", directory.display()),
            e,
        )
    })?;

    let mut staged = NamedTempFile::new_in(directory).map_err(|e| {
        Error::io(
            format!("Failed to create temporary file in {}", directory.display()),
            e,
        )
    })?;

    staged
        .write_all(contents)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    debug!(
        "Staged {} bytes at {}",
        contents.len(),
        staged.path().display()
    );

    staged
        .persist(path)
        .map_err(|e| Error::io(format!("Failed to replace {}", path.display()), e.error))?;

    Ok(contents.len() as u64)
}
