//! Build-file and manifest generation.
//!
//! Rendering is pure: the same project name and package always produce the
//! same bytes. Writing creates parent directories and overwrites.

pub mod gradle;
pub mod manifest;

use std::path::{Path, PathBuf};

use crate::errors::FilesystemError;

pub use gradle::{generate_build_files, render_build_files};
pub use manifest::{MANIFEST_PATH, generate_manifest, render_manifest};

/// A file produced from a template, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub relative_path: PathBuf,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(relative_path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents: contents.into(),
        }
    }

    /// Write under `root`, creating parents and replacing any existing file.
    pub fn write(&self, root: &Path) -> Result<PathBuf, FilesystemError> {
        let path = root.join(&self.relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| FilesystemError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, &self.contents).map_err(|source| FilesystemError::WriteFile {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "generated");
        Ok(path)
    }
}

/// Write every file in order, stopping at the first failure.
pub fn write_all(root: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, FilesystemError> {
    files.iter().map(|file| file.write(root)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempdir().unwrap();
        let file = GeneratedFile::new("a/b/c.txt", "hello");
        let path = file.write(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("a/b/c.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn test_write_overwrites_existing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("x.txt"), "a much longer previous body").unwrap();
        GeneratedFile::new("x.txt", "short").write(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("x.txt")).unwrap(), "short");
    }

    #[test]
    fn test_write_all_stops_on_failure() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("taken.txt")).unwrap();
        let files = [
            GeneratedFile::new("taken.txt", "x"),
            GeneratedFile::new("after.txt", "y"),
        ];
        let err = write_all(dir.path(), &files).unwrap_err();
        assert!(matches!(err, FilesystemError::WriteFile { .. }));
        assert!(!dir.path().join("after.txt").exists());
    }
}
