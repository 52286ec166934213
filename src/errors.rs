//! Typed error hierarchy for droidkit.
//!
//! One enum per pipeline stage, wrapped by `PipelineError`:
//! - `RequestError`: input validation before a run starts
//! - `FetchError`: archive download failures
//! - `ExtractError`: corrupt archives and extraction write failures
//! - `FilesystemError`: scaffolding and file generation failures

use std::path::PathBuf;
use thiserror::Error;

/// Rejected input, reported before a run leaves `Idle`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Please fill all fields ({field} is empty)")]
    EmptyField { field: &'static str },

    #[error("Invalid package identifier '{package}': {reason}")]
    InvalidPackage { package: String, reason: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },
}

/// Errors from downloading the repository archive.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to download {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to write archive to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from unpacking the archive into the project directory.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to open archive {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt or unreadable archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive entry '{name}' escapes the destination directory")]
    UnsafeEntry { name: String },

    #[error("Failed to extract {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from creating directories or writing generated files.
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure that ends a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    #[error("A project is already being created")]
    RunInProgress,

    #[error("Pipeline task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
