//! Zip extraction into the project directory.
//!
//! Entries are written in stored order with their relative paths reproduced
//! as-is, so whatever wrapping folder the archive carries stays in the tree.
//! Entries that would land outside the destination are rejected.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::errors::ExtractError;

/// Counts of what an extraction wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub files: usize,
    pub directories: usize,
}

/// Extract every entry of the zip at `archive` under `destination`.
///
/// Creates `destination` and its parents if absent. Existing files at entry
/// paths are overwritten.
pub fn extract(archive: &Path, destination: &Path) -> Result<ExtractSummary, ExtractError> {
    fs::create_dir_all(destination).map_err(|source| ExtractError::Io {
        path: destination.to_path_buf(),
        source,
    })?;

    let file = File::open(archive).map_err(|source| ExtractError::Open {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut summary = ExtractSummary::default();

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ExtractError::UnsafeEntry {
                name: entry.name().to_string(),
            })?;
        let out_path = destination.join(&relative);

        if entry.is_dir() {
            create_dir(&out_path)?;
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            create_dir(parent)?;
        }
        let mut out_file = File::create(&out_path).map_err(|source| ExtractError::Io {
            path: out_path.clone(),
            source,
        })?;
        io::copy(&mut entry, &mut out_file).map_err(|source| ExtractError::Io {
            path: out_path.clone(),
            source,
        })?;
        tracing::debug!(entry = entry.name(), "extracted");
        summary.files += 1;
    }

    Ok(summary)
}

fn create_dir(path: &Path) -> Result<(), ExtractError> {
    fs::create_dir_all(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    enum Entry<'a> {
        Dir(&'a str),
        File(&'a str, &'a [u8]),
    }

    fn write_zip(path: &Path, entries: &[Entry<'_>]) {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for entry in entries {
            match entry {
                Entry::Dir(name) => writer
                    .add_directory(*name, SimpleFileOptions::default())
                    .unwrap(),
                Entry::File(name, bytes) => {
                    writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                    writer.write_all(bytes).unwrap();
                }
            }
        }
        let cursor = writer.finish().unwrap();
        std::fs::write(path, cursor.into_inner()).unwrap();
    }

    #[test]
    fn test_extract_preserves_structure_and_bytes() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("repo.zip");
        let binary: Vec<u8> = (0..=255u8).collect();
        write_zip(
            &archive,
            &[
                Entry::Dir("repo-main/"),
                Entry::Dir("repo-main/src/"),
                Entry::File("repo-main/src/Main.java", b"class Main {}"),
                Entry::File("repo-main/README.md", b"# repo"),
                Entry::File("repo-main/assets/blob.bin", &binary),
            ],
        );

        let dest = dir.path().join("out").join("Demo");
        let summary = extract(&archive, &dest).unwrap();

        assert_eq!(summary, ExtractSummary { files: 3, directories: 2 });
        assert!(dest.join("repo-main/src").is_dir());
        assert_eq!(
            std::fs::read(dest.join("repo-main/src/Main.java")).unwrap(),
            b"class Main {}"
        );
        assert_eq!(std::fs::read(dest.join("repo-main/README.md")).unwrap(), b"# repo");
        // Parent created even without a directory entry
        assert_eq!(std::fs::read(dest.join("repo-main/assets/blob.bin")).unwrap(), binary);
    }

    #[test]
    fn test_extract_without_wrapping_folder() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("flat.zip");
        write_zip(&archive, &[Entry::File("Top.java", b"class Top {}")]);

        let dest = dir.path().join("Flat");
        extract(&archive, &dest).unwrap();
        assert!(dest.join("Top.java").is_file());
    }

    #[test]
    fn test_extract_overwrites_existing_files() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("repo.zip");
        write_zip(&archive, &[Entry::File("a.txt", b"new")]);

        let dest = dir.path().join("Demo");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("a.txt"), b"old contents").unwrap();

        extract(&archive, &dest).unwrap();
        assert_eq!(std::fs::read(dest.join("a.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_extract_corrupt_archive_fails() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("corrupt.zip");
        std::fs::write(&archive, b"this is not a zip archive").unwrap();

        let err = extract(&archive, &dir.path().join("Demo")).unwrap_err();
        assert!(matches!(err, ExtractError::Archive(_)));
    }

    #[test]
    fn test_extract_missing_archive_fails_with_open() {
        let dir = tempdir().unwrap();
        let err = extract(&dir.path().join("nope.zip"), &dir.path().join("Demo")).unwrap_err();
        assert!(matches!(err, ExtractError::Open { .. }));
    }

    #[test]
    fn test_extract_rejects_entry_escaping_destination() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("evil.zip");
        write_zip(
            &archive,
            &[
                Entry::File("repo-main/ok.txt", b"fine"),
                Entry::File("../evil.txt", b"pwned"),
            ],
        );

        let dest = dir.path().join("out").join("Demo");
        let err = extract(&archive, &dest).unwrap_err();

        match err {
            ExtractError::UnsafeEntry { name } => assert_eq!(name, "../evil.txt"),
            other => panic!("Expected UnsafeEntry, got {:?}", other),
        }
        assert!(!dir.path().join("out").join("evil.txt").exists());
        assert!(!dir.path().join("evil.txt").exists());
    }

    #[test]
    fn test_extract_rejects_nested_traversal_and_absolute_entries() {
        let dir = tempdir().unwrap();
        for name in ["repo/../../outside.txt", "/etc/droidkit-outside.txt"] {
            let archive = dir.path().join("evil.zip");
            write_zip(&archive, &[Entry::File(name, b"pwned")]);

            let err = extract(&archive, &dir.path().join("Demo")).unwrap_err();
            assert!(matches!(err, ExtractError::UnsafeEntry { .. }), "{name}");
        }
        assert!(!dir.path().join("outside.txt").exists());
    }

    #[test]
    fn test_extract_skips_current_dir_components() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("dotted.zip");
        write_zip(&archive, &[Entry::File("./repo-main/src/A.java", b"class A {}")]);

        let dest = dir.path().join("Demo");
        extract(&archive, &dest).unwrap();
        assert!(dest.join("repo-main/src/A.java").is_file());
    }
}
