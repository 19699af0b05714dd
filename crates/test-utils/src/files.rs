//! Temporary files for tests that go through the filesystem.

use std::path::PathBuf;

use tempfile::TempDir;

/// A fresh `asc_`-prefixed directory, removed when the handle drops.
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("asc_")
        .tempdir()
        .unwrap_or_else(|e| panic!("cannot create scratch directory: {}", e))
}

/// Writes `contents` to `name` inside a fresh scratch directory.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
///
/// # Example
///
/// ```
/// use test_utils::write_grid_file;
///
/// let (_dir, path) = write_grid_file("dem.asc", "ncols 1\n");
/// assert!(path.exists());
/// assert_eq!(path.file_name().unwrap(), "dem.asc");
/// ```
pub fn write_grid_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = scratch_dir();
    let path = dir.path().join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("cannot write {}: {}", path.display(), e));
    (dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_dir_removed_on_drop() {
        let dir = scratch_dir();
        let path = dir.path().to_path_buf();
        assert!(path.is_dir());
        assert!(path.to_string_lossy().contains("asc_"));
        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_grid_file_roundtrip() {
        let (dir, path) = write_grid_file("a.asc", "hello");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert!(path.starts_with(dir.path()));
    }
}
