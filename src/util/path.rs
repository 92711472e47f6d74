use std::path::{Path, PathBuf};

/// Render `path` relative to `root` when possible, for report headings.
pub fn display_relative(path: &Path, root: &Path) -> PathBuf {
    if path.is_relative() {
        return path.to_path_buf();
    }
    pathdiff::diff_paths(path, root)
        .filter(|p| !p.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
}

/// True when the last component of `path` equals `file_name`.
pub fn is_named(path: &Path, file_name: &str) -> bool {
    path.file_name().map(|n| n == file_name).unwrap_or(false)
}
