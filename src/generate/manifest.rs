//! `AndroidManifest.xml` generation.

use std::path::{Path, PathBuf};

use super::GeneratedFile;
use crate::errors::FilesystemError;

pub const MANIFEST_PATH: &str = "app/src/main/AndroidManifest.xml";

/// Render the manifest with the project name as the application label.
///
/// The package identifier is carried by the Gradle `namespace`, so the
/// manifest itself does not repeat it.
pub fn render_manifest(project_name: &str, _package_identifier: &str) -> GeneratedFile {
    let label = escape_xml_attr(project_name);
    let contents = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android">

    <uses-permission android:name="android.permission.INTERNET" />

    <application
        android:allowBackup="true"
        android:icon="@mipmap/ic_launcher"
        android:label="{label}"
        android:theme="@android:style/Theme.Material.Light">
        <activity
            android:name=".MainActivity"
            android:exported="true">
            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>
    </application>

</manifest>
"#
    );
    GeneratedFile::new(MANIFEST_PATH, contents)
}

/// Render and write the manifest under `root`.
pub fn generate_manifest(
    root: &Path,
    project_name: &str,
    package_identifier: &str,
) -> Result<PathBuf, FilesystemError> {
    render_manifest(project_name, package_identifier).write(root)
}

fn escape_xml_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
