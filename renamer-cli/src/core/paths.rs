use std::path::{Component, Path, PathBuf};

/// Make `path` absolute and resolve `.`/`..` lexically, without touching symlinks
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Case-folded comparison key for a path
///
/// Two paths that could name the same entry on a case-insensitive filesystem
/// produce the same key.
pub fn path_key(path: &Path) -> String {
    normalize(path).to_string_lossy().to_lowercase()
}

/// Split a file name into stem and extension the way `Path` does
///
/// The extension keeps its leading dot so `stem + ext` reproduces the name.
/// Dotfiles such as `.bashrc` have no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let path = Path::new(name);
    match (path.file_stem().and_then(|s| s.to_str()), path.extension()) {
        (Some(stem), Some(_)) if stem.len() < name.len() => name.split_at(stem.len()),
        _ => (name, ""),
    }
}

/// Whether `name` can be used as a single entry name inside the folder
pub fn is_valid_entry_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    !name.chars().any(std::path::is_separator)
}

/// True when something (file, directory, or even a dangling symlink) sits at `path`
pub fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
