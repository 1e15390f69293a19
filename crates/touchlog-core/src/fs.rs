//! Filesystem utilities for atomic operations.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        // Best-effort replace on platforms where rename fails if target exists.
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

/// Sibling path used while writing `destination`: `.<name>.tmp` in the same directory.
pub fn sibling_temp_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    destination.with_file_name(format!(".{}.tmp", name))
}

/// Write `contents` to the sibling temp path of `destination` and flush it to disk.
///
/// Returns the sibling path. The destination itself is not touched.
pub fn write_sibling(destination: &Path, contents: &[u8]) -> io::Result<PathBuf> {
    let sibling = sibling_temp_path(destination);
    let result = (|| {
        let mut file = File::create(&sibling)?;
        file.write_all(contents)?;
        file.sync_all()
    })();
    if let Err(err) = result {
        let _ = fs::remove_file(&sibling);
        return Err(err);
    }
    Ok(sibling)
}

/// Write `contents` to `destination` so readers see either nothing or the full file.
pub fn write_atomic(destination: &Path, contents: &[u8]) -> io::Result<()> {
    let sibling = write_sibling(destination, contents)?;
    rename_with_fallback(&sibling, destination)
}
