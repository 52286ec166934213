//! Validated input for a single pipeline run.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::errors::RequestError;

/// Branch whose snapshot is downloaded. Not configurable.
pub const ARCHIVE_BRANCH: &str = "main";

static JAVA_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// The three strings a caller supplies to create a project.
///
/// All fields are trimmed on construction. The repository URL has any
/// trailing `.git` removed, so `zip_url` can append the archive path directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    repository_url: String,
    project_name: String,
    package_identifier: String,
}

impl ProjectRequest {
    pub fn new(
        repository_url: &str,
        project_name: &str,
        package_identifier: &str,
    ) -> Result<Self, RequestError> {
        let repository_url = require_field(repository_url, "repository URL")?;
        let project_name = require_field(project_name, "project name")?;
        validate_project_name(project_name)?;
        let package_identifier = require_field(package_identifier, "package identifier")?;
        validate_package(package_identifier)?;

        Ok(Self {
            repository_url: strip_git_suffix(repository_url).to_string(),
            project_name: project_name.to_string(),
            package_identifier: package_identifier.to_string(),
        })
    }

    /// Repository URL with any `.git` suffix already removed.
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn package_identifier(&self) -> &str {
        &self.package_identifier
    }

    /// URL of the zip snapshot of the `main` branch.
    pub fn zip_url(&self) -> String {
        format!(
            "{}/archive/refs/heads/{}.zip",
            self.repository_url, ARCHIVE_BRANCH
        )
    }

    /// Package identifier as a nested relative path (`com.example` -> `com/example`).
    pub fn package_path(&self) -> PathBuf {
        package_path(&self.package_identifier)
    }
}

/// Derive the archive URL for a repository without building a full request.
///
/// The name and package do not influence the URL; they are accepted so the
/// signature mirrors the three-field input of a run.
pub fn derive_zip_url(repository_url: &str, _project_name: &str, _package: &str) -> String {
    format!(
        "{}/archive/refs/heads/{}.zip",
        strip_git_suffix(repository_url.trim()),
        ARCHIVE_BRANCH
    )
}

/// Convert a dotted package identifier into a relative directory path.
pub fn package_path(package_identifier: &str) -> PathBuf {
    package_identifier.split('.').collect()
}

fn strip_git_suffix(url: &str) -> &str {
    url.strip_suffix(".git").unwrap_or(url)
}

/// Trim `value`, rejecting it if nothing is left.
pub fn require_field<'a>(value: &'a str, field: &'static str) -> Result<&'a str, RequestError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RequestError::EmptyField { field });
    }
    Ok(trimmed)
}

/// Check that `name` is a single directory name, so the project stays
/// directly under the base directory.
pub fn validate_project_name(name: &str) -> Result<(), RequestError> {
    let invalid = |reason: &str| RequestError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name == "." || name == ".." {
        return Err(invalid("must not be a relative directory reference"));
    }
    if name.contains(['/', '\\']) || Path::new(name).is_absolute() {
        return Err(invalid("must not contain path separators"));
    }
    if name.contains('\0') {
        return Err(invalid("must not contain NUL"));
    }
    Ok(())
}

/// Check that every dot-separated segment is a Java identifier.
pub fn validate_package(package: &str) -> Result<(), RequestError> {
    for segment in package.split('.') {
        if segment.is_empty() {
            return Err(RequestError::InvalidPackage {
                package: package.to_string(),
                reason: "segments must not be empty".to_string(),
            });
        }
        if !JAVA_IDENTIFIER.is_match(segment) {
            return Err(RequestError::InvalidPackage {
                package: package.to_string(),
                reason: format!("'{}' is not a valid identifier", segment),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_zip_url_strips_git_suffix() {
        assert_eq!(
            derive_zip_url("https://host/r.git", "n", "p"),
            "https://host/r/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn test_derive_zip_url_without_suffix() {
        assert_eq!(
            derive_zip_url("https://github.com/owner/repo", "n", "p"),
            "https://github.com/owner/repo/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn test_new_trims_fields() {
        let req = ProjectRequest::new(
            "  https://github.com/owner/repo.git \n",
            " Demo ",
            "\tcom.example.demo ",
        )
        .unwrap();
        assert_eq!(req.repository_url(), "https://github.com/owner/repo");
        assert_eq!(req.project_name(), "Demo");
        assert_eq!(req.package_identifier(), "com.example.demo");
        assert_eq!(
            req.zip_url(),
            "https://github.com/owner/repo/archive/refs/heads/main.zip"
        );
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        assert_eq!(
            ProjectRequest::new("   ", "Demo", "com.example"),
            Err(RequestError::EmptyField {
                field: "repository URL"
            })
        );
        assert_eq!(
            ProjectRequest::new("https://host/r", "", "com.example"),
            Err(RequestError::EmptyField {
                field: "project name"
            })
        );
        assert_eq!(
            ProjectRequest::new("https://host/r", "Demo", " \t"),
            Err(RequestError::EmptyField {
                field: "package identifier"
            })
        );
    }

    #[test]
    fn test_new_rejects_empty_package_segments() {
        for pkg in ["com..demo", ".com.demo", "com.demo."] {
            let err = ProjectRequest::new("https://host/r", "Demo", pkg).unwrap_err();
            assert!(matches!(err, RequestError::InvalidPackage { .. }), "{pkg}");
        }
    }

    #[test]
    fn test_new_rejects_non_identifier_segments() {
        let err = ProjectRequest::new("https://host/r", "Demo", "com.1example").unwrap_err();
        assert!(err.to_string().contains("'1example'"));
        assert!(ProjectRequest::new("https://host/r", "Demo", "com.my-app").is_err());
    }

    #[test]
    fn test_single_segment_package_is_valid() {
        let req = ProjectRequest::new("https://host/r", "Demo", "demo").unwrap();
        assert_eq!(req.package_path(), Path::new("demo"));
    }

    #[test]
    fn test_package_path_nests_segments() {
        assert_eq!(
            package_path("com.example.demo"),
            Path::new("com").join("example").join("demo")
        );
    }

    #[test]
    fn test_only_trailing_git_is_stripped() {
        let req = ProjectRequest::new("https://host/my.github.io", "Demo", "com.x").unwrap();
        assert_eq!(req.repository_url(), "https://host/my.github.io");
    }

    #[test]
    fn test_new_rejects_names_that_leave_base_dir() {
        for name in ["..", ".", "../Sibling", "nested/Demo", "/tmp/Escaped", "C:\\Demo", "a\\b"] {
            let err = ProjectRequest::new("https://host/r", name, "com.x").unwrap_err();
            assert!(
                matches!(err, RequestError::InvalidProjectName { .. }),
                "{name} was accepted"
            );
        }
    }

    #[test]
    fn test_project_name_allows_dots_and_spaces() {
        let req = ProjectRequest::new("https://host/r", "My App.v2", "com.x").unwrap();
        assert_eq!(req.project_name(), "My App.v2");
        assert!(validate_project_name("..hidden").is_ok());
    }
}
