use std::path::Path;

use crate::executor::staging::TEMP_MARKER;

/// Check if a path is a transient staging name left by a running rename batch
pub fn is_staging_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(TEMP_MARKER))
        .unwrap_or(false)
}

/// Check if a change at `path` can alter the listing of `folder`
pub fn is_relevant_change(folder: &Path, path: &Path) -> bool {
    !is_staging_path(path) && (path.parent() == Some(folder) || path == folder)
}
