//! `droidkit plan`: preview a project's layout offline.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use droidkit::generate::{render_build_files, render_manifest};
use droidkit::request::{
    derive_zip_url, require_field, validate_package, validate_project_name,
};
use droidkit::scaffold::skeleton;
use droidkit::ui::icons::{FOLDER, PACKAGE};

#[derive(Debug, Serialize)]
struct PlanReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    archive_url: Option<String>,
    project_name: String,
    package_identifier: String,
    directories: Vec<String>,
    files: Vec<String>,
}

pub fn cmd_plan(name: &str, package: &str, url: Option<&str>, json: bool) -> Result<()> {
    let name = require_field(name, "project name")?;
    validate_project_name(name)?;
    let package = require_field(package, "package identifier")?;
    validate_package(package)?;
    let url = url.map(|u| require_field(u, "repository URL")).transpose()?;

    let mut files: Vec<String> = render_build_files(name, package)
        .into_iter()
        .map(|f| f.relative_path.display().to_string())
        .collect();
    files.push(render_manifest(name, package).relative_path.display().to_string());

    let report = PlanReport {
        archive_url: url.map(|u| derive_zip_url(u, name, package)),
        project_name: name.to_string(),
        package_identifier: package.to_string(),
        directories: skeleton(package)
            .iter()
            .map(|d| d.display().to_string())
            .collect(),
        files,
    };

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize plan")?;
        println!("{}", out);
        return Ok(());
    }

    println!(
        "{} ({})",
        style(&report.project_name).bold().cyan(),
        report.package_identifier
    );
    if let Some(archive_url) = &report.archive_url {
        println!("Archive: {}", archive_url);
    }
    println!();
    println!("Directories:");
    for dir in &report.directories {
        println!("  {}{}/", FOLDER, dir);
    }
    println!();
    println!("Generated files:");
    for file in &report.files {
        println!("  {}{}", PACKAGE, file);
    }
    Ok(())
}
