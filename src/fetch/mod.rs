//! Archive download.
//!
//! The pipeline talks to the network only through [`ArchiveSource`], so tests
//! can drive a run with a local fake. [`HttpFetcher`] is the real
//! implementation: it streams the response body chunk by chunk into a scratch
//! file and never holds the whole archive in memory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::errors::FetchError;

/// A downloaded archive on local disk, owned by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHandle {
    path: PathBuf,
    size: u64,
}

impl ArchiveHandle {
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of bytes written to the scratch file.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Delete the scratch file.
    pub fn remove(self) -> std::io::Result<()> {
        std::fs::remove_file(&self.path)
    }
}

/// Source of repository archives.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Retrieve `url` into the file at `dest`.
    ///
    /// A failed transfer may leave a partially written file at `dest`.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<ArchiveHandle, FetchError>;
}

/// Downloads archives over HTTP(S) with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArchiveSource for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<ArchiveHandle, FetchError> {
        let request_err = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };
        let io_err = |source| FetchError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let mut response = self.client.get(url).send().await.map_err(request_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let mut file = tokio::fs::File::create(dest).await.map_err(io_err)?;

        let mut size = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(request_err)? {
            file.write_all(&chunk).await.map_err(io_err)?;
            size += chunk.len() as u64;
            tracing::trace!("wrote chunk of size {}", chunk.len());
        }
        file.flush().await.map_err(io_err)?;

        tracing::debug!(url, path = %dest.display(), size, "archive downloaded");
        Ok(ArchiveHandle::new(dest.to_path_buf(), size))
    }
}
