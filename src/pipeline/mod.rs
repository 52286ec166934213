//! Pipeline orchestration.
//!
//! A run walks a fixed sequence of states, announcing each over an ordered
//! progress channel before doing the work:
//!
//! ```text
//! Idle -> Downloading -> Extracting -> Scaffolding -> WritingBuildFiles
//!      -> WritingManifest -> OrganizingSources -> Succeeded
//! ```
//!
//! The first failing step moves the run to `Failed` and nothing after it
//! runs. Filesystem steps execute on the blocking pool; the run itself is a
//! single tokio task. A partially built project directory is never cleaned
//! up, and the scratch archive is only removed on success.

pub mod slot;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Settings;
use crate::errors::PipelineError;
use crate::extract::extract;
use crate::fetch::{ArchiveSource, HttpFetcher};
use crate::generate::{generate_build_files, generate_manifest};
use crate::organize::organize_sources;
use crate::request::ProjectRequest;
use crate::scaffold::scaffold;

pub use slot::{RunGuard, RunSlot};

/// Where a run currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Downloading,
    Extracting,
    Scaffolding,
    WritingBuildFiles,
    WritingManifest,
    OrganizingSources,
    Succeeded,
    Failed(String),
}

impl PipelineState {
    /// Message announced when the run enters this state.
    pub fn progress_message(&self) -> Option<&'static str> {
        match self {
            PipelineState::Downloading => Some("Downloading repository..."),
            PipelineState::Extracting => Some("Extracting files..."),
            PipelineState::Scaffolding => Some("Creating Android structure..."),
            PipelineState::WritingBuildFiles => Some("Creating Gradle files..."),
            PipelineState::WritingManifest => Some("Creating AndroidManifest.xml..."),
            PipelineState::OrganizingSources => Some("Organizing source files..."),
            PipelineState::Idle | PipelineState::Succeeded | PipelineState::Failed(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed(_))
    }
}

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Succeeded { location: PathBuf },
    Failed { message: String },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Succeeded { .. })
    }
}

/// A message on the progress channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The run entered a working state.
    Step {
        state: PipelineState,
        message: String,
    },
    /// A step failed; always followed by `Finished`.
    Error { message: String },
    Finished(PipelineOutcome),
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressEvent::Step { message, .. } => write!(f, "{}", message),
            ProgressEvent::Error { message } => write!(f, "Error: {}", message),
            ProgressEvent::Finished(PipelineOutcome::Succeeded { location }) => {
                write!(f, "Project created at {}", location.display())
            }
            ProgressEvent::Finished(PipelineOutcome::Failed { message }) => {
                write!(f, "Failed to create project: {}", message)
            }
        }
    }
}

/// Handle to a run started with [`Pipeline::spawn`].
pub struct RunHandle {
    pub events: mpsc::UnboundedReceiver<ProgressEvent>,
    pub task: JoinHandle<PipelineOutcome>,
}

/// Sends progress events and tracks the current state of one run.
struct Reporter<'a> {
    events: &'a mpsc::UnboundedSender<ProgressEvent>,
    state: PipelineState,
}

impl Reporter<'_> {
    fn enter(&mut self, state: PipelineState) {
        if let Some(message) = state.progress_message() {
            tracing::info!("{}", message);
            self.send(ProgressEvent::Step {
                state: state.clone(),
                message: message.to_string(),
            });
        }
        self.state = state;
    }

    // A dropped receiver must not fail the run.
    fn send(&self, event: ProgressEvent) {
        let _ = self.events.send(event);
    }
}

/// Runs fetch → extract → scaffold → generate → organize for one request.
pub struct Pipeline<S = HttpFetcher> {
    source: Arc<S>,
    settings: Settings,
}

impl Pipeline<HttpFetcher> {
    /// Pipeline that downloads over HTTP using the configured client settings.
    pub fn from_settings(settings: Settings) -> Result<Self, PipelineError> {
        let fetcher = HttpFetcher::new(&settings.user_agent, settings.timeout)?;
        Ok(Self::new(fetcher, settings))
    }
}

impl<S: ArchiveSource + 'static> Pipeline<S> {
    pub fn new(source: S, settings: Settings) -> Self {
        Self {
            source: Arc::new(source),
            settings,
        }
    }

    /// Execute a run in the current task, reporting on `events`.
    ///
    /// The final event sent is always `Finished` carrying the returned outcome.
    pub async fn run(
        &self,
        request: &ProjectRequest,
        events: &mpsc::UnboundedSender<ProgressEvent>,
    ) -> PipelineOutcome {
        let mut reporter = Reporter {
            events,
            state: PipelineState::Idle,
        };

        let outcome = match self.execute(request, &mut reporter).await {
            Ok(location) => {
                reporter.enter(PipelineState::Succeeded);
                tracing::info!(location = %location.display(), "project created");
                PipelineOutcome::Succeeded { location }
            }
            Err(e) => {
                let message = e.to_string();
                tracing::debug!(state = ?reporter.state, "pipeline failed: {}", message);
                reporter.send(ProgressEvent::Error {
                    message: message.clone(),
                });
                reporter.enter(PipelineState::Failed(message.clone()));
                PipelineOutcome::Failed { message }
            }
        };

        reporter.send(ProgressEvent::Finished(outcome.clone()));
        outcome
    }

    /// Start a run on its own tokio task. `guard` is held until the run ends.
    pub fn spawn(self, request: ProjectRequest, guard: RunGuard) -> RunHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let outcome = self.run(&request, &tx).await;
            drop(guard);
            outcome
        });
        RunHandle { events: rx, task }
    }

    async fn execute(
        &self,
        request: &ProjectRequest,
        reporter: &mut Reporter<'_>,
    ) -> Result<PathBuf, PipelineError> {
        let project_dir = self.settings.project_dir(request.project_name());
        let name = request.project_name().to_string();
        let package = request.package_identifier().to_string();

        reporter.enter(PipelineState::Downloading);
        let scratch = self.scratch_path();
        let archive = self.source.fetch(&request.zip_url(), &scratch).await?;
        tracing::debug!(bytes = archive.size(), "archive ready");

        reporter.enter(PipelineState::Extracting);
        let archive_path = archive.path().to_path_buf();
        let dest = project_dir.clone();
        let summary = blocking(move || extract(&archive_path, &dest)).await?;
        tracing::debug!(files = summary.files, dirs = summary.directories, "extracted");

        reporter.enter(PipelineState::Scaffolding);
        let (root, pkg) = (project_dir.clone(), package.clone());
        blocking(move || scaffold(&root, &pkg)).await?;

        reporter.enter(PipelineState::WritingBuildFiles);
        let (root, n, pkg) = (project_dir.clone(), name.clone(), package.clone());
        blocking(move || generate_build_files(&root, &n, &pkg)).await?;

        reporter.enter(PipelineState::WritingManifest);
        let (root, n, pkg) = (project_dir.clone(), name, package.clone());
        blocking(move || generate_manifest(&root, &n, &pkg)).await?;

        reporter.enter(PipelineState::OrganizingSources);
        let (root, suffixes) = (project_dir.clone(), self.settings.source_suffixes.clone());
        let report =
            tokio::task::spawn_blocking(move || organize_sources(&root, &package, &suffixes))
                .await?;
        if report.failed > 0 {
            tracing::warn!(failed = report.failed, "some source files were not copied");
        }
        tracing::debug!(copied = report.copied, "sources organized");

        if let Err(e) = archive.remove() {
            tracing::warn!(path = %scratch.display(), "failed to remove scratch archive: {}", e);
        }
        Ok(project_dir)
    }

    fn scratch_path(&self) -> PathBuf {
        self.settings
            .scratch_dir
            .join(format!("droidkit-{}.zip", uuid::Uuid::new_v4()))
    }
}

/// Run a filesystem step on the blocking pool.
async fn blocking<T, E>(
    f: impl FnOnce() -> Result<T, E> + Send + 'static,
) -> Result<T, PipelineError>
where
    T: Send + 'static,
    E: Into<PipelineError> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await?.map_err(Into::into)
}
