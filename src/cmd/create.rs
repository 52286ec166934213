//! `droidkit create`: run the pipeline with terminal progress.

use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

use droidkit::config::DroidkitConfig;
use droidkit::pipeline::{Pipeline, PipelineOutcome, ProgressEvent, RunSlot};
use droidkit::request::ProjectRequest;
use droidkit::ui::ProjectUI;
use droidkit::ui::icons::SPARKLE;

use crate::Cli;

pub async fn cmd_create(
    cli: &Cli,
    cwd: &Path,
    url: &str,
    name: &str,
    package: &str,
    base_dir: Option<PathBuf>,
) -> Result<()> {
    // Validation happens before any network or disk access.
    let request = ProjectRequest::new(url, name, package)?;

    let mut config = DroidkitConfig::discover(cli.config.as_deref(), cwd)?;
    config.apply_env();
    let settings = config.resolve(base_dir);

    let project_dir = settings.project_dir(request.project_name());
    if project_dir.exists() {
        tracing::warn!(
            dir = %project_dir.display(),
            "project directory already exists; files will be overwritten"
        );
    }

    let pipeline = Pipeline::from_settings(settings)?;
    let slot = RunSlot::new();
    let guard = slot.try_acquire()?;
    let mut handle = pipeline.spawn(request, guard);

    let mut ui = ProjectUI::new(cli.verbose);
    while let Some(event) = handle.events.recv().await {
        ui.handle_event(&event);
        if let ProgressEvent::Error { .. } = &event {
            eprintln!("{}", event);
        }
    }

    match handle.task.await? {
        PipelineOutcome::Succeeded { location } => {
            println!("{}{}", SPARKLE, style("Project created successfully!").green().bold());
            println!("Location: {}", location.display());
            Ok(())
        }
        // The cause was already printed from the progress channel.
        PipelineOutcome::Failed { .. } => anyhow::bail!("Failed to create project"),
    }
}
