//! Atomic artifact writing.
//!
//! Content is written to a sibling temporary file and renamed over the
//! destination, so readers never observe a partially written artifact.
//! Parent directories are created with `mkdir -p` behavior.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Write `content` to `destination` through a temp file + rename.
///
/// # Errors
///
/// Returns [`Error::Write`] if the directory cannot be created, the temporary
/// file cannot be written or the rename fails. The temporary file is removed
/// on failure.
pub fn write_atomic(destination: &Path, content: &[u8]) -> Result<()> {
    let destination = destination.clean();
    let write_error = |source| Error::Write {
        path: destination.clone(),
        source,
    };

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let temp_path = temp_path_for(&destination);
    if let Err(e) = fs::write(&temp_path, content) {
        cleanup_temp_file(&temp_path);
        return Err(write_error(e));
    }

    if let Err(e) = fs::rename(&temp_path, &destination) {
        cleanup_temp_file(&temp_path);
        return Err(write_error(e));
    }

    debug!(path = %destination.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}

/// `dist/vue.min.js` -> `dist/.vue.min.js.tmp`
fn temp_path_for(destination: &Path) -> PathBuf {
    let file_name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{file_name}.tmp"))
}

/// Best-effort cleanup; we are already in an error state.
fn cleanup_temp_file(temp_path: &Path) {
    if temp_path.exists() {
        if let Err(e) = fs::remove_file(temp_path) {
            warn!(path = %temp_path.display(), error = %e, "failed to remove temporary file");
        }
    }
}
