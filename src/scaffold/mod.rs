//! Android project skeleton.
//!
//! `scaffold` creates the directory layout the Gradle Android plugin expects:
//!
//! ```text
//! <project>/
//! ├── app/
//! │   ├── build/
//! │   ├── libs/
//! │   └── src/main/
//! │       ├── assets/
//! │       ├── java/<package path>/
//! │       └── res/
//! │           ├── drawable/
//! │           ├── layout/
//! │           ├── mipmap-{hdpi,mdpi,xhdpi,xxhdpi}/
//! │           └── values/
//! └── gradle/wrapper/
//! ```

use std::path::{Path, PathBuf};

use crate::errors::FilesystemError;
use crate::request::package_path;

/// Prefix of the package-qualified source directory.
pub const JAVA_SOURCE_ROOT: &str = "app/src/main/java";

/// Skeleton directories that do not depend on the package identifier.
pub const STATIC_DIRECTORIES: [&str; 11] = [
    "app/src/main/res/layout",
    "app/src/main/res/values",
    "app/src/main/res/drawable",
    "app/src/main/res/mipmap-hdpi",
    "app/src/main/res/mipmap-mdpi",
    "app/src/main/res/mipmap-xhdpi",
    "app/src/main/res/mipmap-xxhdpi",
    "app/src/main/assets",
    "app/build",
    "app/libs",
    "gradle/wrapper",
];

/// Relative path of the directory that receives source files.
pub fn source_dir(package_identifier: &str) -> PathBuf {
    Path::new(JAVA_SOURCE_ROOT).join(package_path(package_identifier))
}

/// Every skeleton directory, relative to the project root, source directory first.
pub fn skeleton(package_identifier: &str) -> Vec<PathBuf> {
    std::iter::once(source_dir(package_identifier))
        .chain(STATIC_DIRECTORIES.iter().map(PathBuf::from))
        .collect()
}

/// Create the skeleton under `root`. Directories that already exist are left
/// alone, so calling this twice is harmless.
///
/// Returns the absolute paths of every skeleton directory.
pub fn scaffold(root: &Path, package_identifier: &str) -> Result<Vec<PathBuf>, FilesystemError> {
    let mut paths = Vec::with_capacity(STATIC_DIRECTORIES.len() + 1);
    for relative in skeleton(package_identifier) {
        let path = root.join(relative);
        std::fs::create_dir_all(&path).map_err(|source| FilesystemError::CreateDir {
            path: path.clone(),
            source,
        })?;
        paths.push(path);
    }
    tracing::debug!(root = %root.display(), count = paths.len(), "skeleton ready");
    Ok(paths)
}
