//! Temp-file-then-rename replacement of files on disk
//!
//! The replacement is written to a sibling temporary file, so the final
//! rename never crosses a filesystem boundary. Until the rename succeeds the
//! original is never touched, and the temporary file is removed on every
//! failure path when the `NamedTempFile` guard drops.

use crate::constants::TEMP_FILE_PREFIX;
use crate::error::{OptimizeError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

fn save_failed(err: impl std::fmt::Display) -> OptimizeError {
    OptimizeError::SaveFailed(err.to_string())
}

/// Directory the temporary file is created in: the target's parent, or the
/// current directory for bare file names.
fn parent_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Temp file suffix, the target's own extension including the dot.
fn temp_suffix(target: &Path) -> String {
    target
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Replaces `target` with whatever `write` produces.
///
/// # Arguments
/// * `target` - File to replace; its permissions carry over to the new file
/// * `write` - Fills the temporary file; any error it returns aborts the swap
///
/// # Returns
/// * `Ok(new_size)` - Size in bytes of the file now at `target`
/// * `Err(OptimizeError::SaveFailed)` - Creating, writing or renaming failed.
///   `target` is unchanged and no temporary file remains.
pub fn replace_atomically<F>(target: &Path, write: F) -> Result<u64>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(&temp_suffix(target))
        .tempfile_in(parent_dir(target))
        .map_err(save_failed)?;
    debug!(temp = %temp.path().display(), target = %target.display(), "writing replacement");

    write(temp.as_file_mut())?;

    let file = temp.as_file_mut();
    file.flush().map_err(save_failed)?;
    file.sync_all().map_err(save_failed)?;
    let new_size = file.metadata().map_err(save_failed)?.len();

    // NamedTempFile is created 0600; keep the original's mode instead.
    if let Ok(metadata) = fs::metadata(target) {
        fs::set_permissions(temp.path(), metadata.permissions()).map_err(save_failed)?;
    }

    temp.persist(target).map_err(|e| save_failed(e.error))?;
    debug!(target = %target.display(), new_size, "replaced");

    Ok(new_size)
}
