//! Layered configuration for droidkit.
//!
//! Settings are resolved in order, later layers winning:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, `./droidkit.toml`, or `<config dir>/droidkit/config.toml`)
//! 3. Environment (`DROIDKIT_BASE_DIR`, `DROIDKIT_SCRATCH_DIR`)
//! 4. CLI flags
//!
//! # Configuration File Format
//!
//! ```toml
//! [storage]
//! base_dir = "/sdcard"
//! scratch_dir = "/tmp"
//!
//! [network]
//! user_agent = "droidkit"
//! timeout_secs = 120
//!
//! [organize]
//! source_suffixes = [".java"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "droidkit.toml";

pub const ENV_BASE_DIR: &str = "DROIDKIT_BASE_DIR";
pub const ENV_SCRATCH_DIR: &str = "DROIDKIT_SCRATCH_DIR";

/// Where projects and scratch archives live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Directory under which `<project name>/` is created
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// Directory for the downloaded archive
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

/// HTTP client settings for the archive download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSection {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_user_agent() -> String {
    format!("droidkit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which files the organizer relocates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeSection {
    #[serde(default = "default_source_suffixes")]
    pub source_suffixes: Vec<String>,
}

fn default_source_suffixes() -> Vec<String> {
    vec![".java".to_string()]
}

impl Default for OrganizeSection {
    fn default() -> Self {
        Self {
            source_suffixes: default_source_suffixes(),
        }
    }
}

/// Contents of a droidkit TOML file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DroidkitConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub organize: OrganizeSection,
}

impl DroidkitConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse droidkit config")
    }

    /// Load the explicit file if given, otherwise the first default location
    /// that exists, otherwise built-in defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load(&local);
        }

        if let Some(global) = dirs::config_dir().map(|d| d.join("droidkit").join("config.toml"))
            && global.exists()
        {
            return Self::load(&global);
        }

        Ok(Self::default())
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_BASE_DIR).filter(|v| !v.trim().is_empty()) {
            self.storage.base_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = lookup(ENV_SCRATCH_DIR).filter(|v| !v.trim().is_empty()) {
            self.storage.scratch_dir = Some(PathBuf::from(dir));
        }
    }

    /// Resolve into the runtime settings of a pipeline.
    pub fn resolve(&self, base_dir_override: Option<PathBuf>) -> Settings {
        let base_dir = base_dir_override
            .or_else(|| self.storage.base_dir.clone())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let scratch_dir = self
            .storage
            .scratch_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);

        Settings {
            base_dir,
            scratch_dir,
            user_agent: self.network.user_agent.clone(),
            timeout: Duration::from_secs(self.network.timeout_secs),
            source_suffixes: self.organize.source_suffixes.clone(),
        }
    }
}

/// Resolved settings consumed by the pipeline.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Parent of every project directory
    pub base_dir: PathBuf,
    /// Where the run's archive is downloaded
    pub scratch_dir: PathBuf,
    pub user_agent: String,
    pub timeout: Duration,
    pub source_suffixes: Vec<String>,
}

impl Settings {
    /// Settings rooted at `base_dir` with every other value at its default.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        DroidkitConfig::default().resolve(Some(base_dir.into()))
    }

    /// Destination root for a project.
    pub fn project_dir(&self, project_name: &str) -> PathBuf {
        self.base_dir.join(project_name)
    }
}
