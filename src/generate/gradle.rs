//! Gradle build descriptors.

use std::path::{Path, PathBuf};

use super::{GeneratedFile, write_all};
use crate::errors::FilesystemError;

pub const ANDROID_GRADLE_PLUGIN: &str = "com.android.tools.build:gradle:7.4.0";
pub const COMPILE_SDK: u32 = 33;
pub const MIN_SDK: u32 = 21;
pub const TARGET_SDK: u32 = 33;

/// Render `build.gradle`, `app/build.gradle`, `settings.gradle` and
/// `gradle.properties`, in that order.
pub fn render_build_files(project_name: &str, package_identifier: &str) -> Vec<GeneratedFile> {
    vec![
        GeneratedFile::new("build.gradle", root_build_gradle()),
        GeneratedFile::new("app/build.gradle", app_build_gradle(package_identifier)),
        GeneratedFile::new("settings.gradle", settings_gradle(project_name)),
        GeneratedFile::new("gradle.properties", gradle_properties()),
    ]
}

/// Render and write the four build files under `root`.
pub fn generate_build_files(
    root: &Path,
    project_name: &str,
    package_identifier: &str,
) -> Result<Vec<PathBuf>, FilesystemError> {
    write_all(root, &render_build_files(project_name, package_identifier))
}

fn root_build_gradle() -> String {
    format!(
        r#"buildscript {{
    repositories {{
        google()
        mavenCentral()
    }}
    dependencies {{
        classpath '{ANDROID_GRADLE_PLUGIN}'
    }}
}}

allprojects {{
    repositories {{
        google()
        mavenCentral()
    }}
}}
"#
    )
}

fn app_build_gradle(package: &str) -> String {
    format!(
        r#"plugins {{
    id 'com.android.application'
}}

android {{
    namespace '{package}'
    compileSdk {COMPILE_SDK}

    defaultConfig {{
        applicationId "{package}"
        minSdk {MIN_SDK}
        targetSdk {TARGET_SDK}
        versionCode 1
        versionName "1.0"
    }}

    buildTypes {{
        release {{
            minifyEnabled false
        }}
    }}
}}

dependencies {{
}}
"#
    )
}

fn settings_gradle(project_name: &str) -> String {
    format!(
        "rootProject.name = '{}'\ninclude ':app'\n",
        escape_single_quoted(project_name)
    )
}

fn gradle_properties() -> String {
    "org.gradle.jvmargs=-Xmx2048m\nandroid.useAndroidX=true\n".to_string()
}

/// Escape a value for a single-quoted Groovy string literal.
fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
