//! Relocation of source files into the package directory.
//!
//! The whole project tree is searched, generated directories included.
//! Matching files are copied flat into the package directory under their own
//! file names, so same-named files overwrite each other and the one visited
//! last wins. Visit order is depth first with entries sorted by file name.
//!
//! This step is best effort: a file that cannot be read or copied is logged
//! and counted, never returned as an error.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::scaffold::source_dir;

/// Outcome of an organize pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    /// Files copied into the package directory
    pub copied: usize,
    /// Files or directories that could not be read or copied
    pub failed: usize,
}

/// Whether `path` has a file name ending in one of `suffixes`.
pub fn is_source_file(path: &Path, suffixes: &[String]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())))
}

/// Copy every file under `root` matching `suffixes` into the package directory.
pub fn organize_sources(root: &Path, package_identifier: &str, suffixes: &[String]) -> OrganizeReport {
    let dest_dir = root.join(source_dir(package_identifier));
    let mut report = OrganizeReport::default();

    let candidates = collect_sources(root, suffixes, &mut report);

    if let Err(e) = std::fs::create_dir_all(&dest_dir) {
        tracing::warn!(dir = %dest_dir.display(), "cannot create source directory: {}", e);
        report.failed += candidates.len();
        return report;
    }

    for source in candidates {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let target = dest_dir.join(file_name);
        if target == source {
            // Already in place; copying onto itself would truncate it.
            continue;
        }
        match std::fs::copy(&source, &target) {
            Ok(_) => {
                tracing::debug!(from = %source.display(), to = %target.display(), "copied source");
                report.copied += 1;
            }
            Err(e) => {
                tracing::warn!(from = %source.display(), "failed to copy source file: {}", e);
                report.failed += 1;
            }
        }
    }

    report
}

/// Gather matching files before copying so files written into the package
/// directory during the pass are not revisited.
fn collect_sources(root: &Path, suffixes: &[String], report: &mut OrganizeReport) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_source_file(entry.path(), suffixes) {
                    sources.push(entry.into_path());
                }
            }
            Err(e) => {
                tracing::warn!("skipping unreadable path while organizing sources: {}", e);
                report.failed += 1;
            }
        }
    }
    sources
}
