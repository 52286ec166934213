//! Turn a repository's `main` branch snapshot into an Android project.
//!
//! A run downloads `{repo}/archive/refs/heads/main.zip`, extracts it into
//! `{base_dir}/{project name}`, creates the Android directory skeleton,
//! writes Gradle files and a manifest, then copies every source file into the
//! package directory. See [`pipeline`] for sequencing and failure handling.

pub mod config;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod generate;
pub mod organize;
pub mod pipeline;
pub mod request;
pub mod scaffold;
pub mod ui;

pub use errors::PipelineError;
pub use pipeline::{Pipeline, PipelineOutcome, PipelineState, ProgressEvent, RunSlot};
pub use request::{ProjectRequest, derive_zip_url};
