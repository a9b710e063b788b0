use crate::cli::Cli;
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use poseview::config::{ClientConfig, ClientConfigBuilder};
use poseview::error::JobError;
use poseview::models::ImageFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Settings read from a TOML file; every key is optional.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialClientConfig {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    poll_interval_ms: Option<u64>,
    output_dir: Option<PathBuf>,
    format: Option<String>,
}

/// Everything a run needs once file and command line have been merged.
#[derive(Debug)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub format: String,
}

impl PartialClientConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named on the command line, or the per-user default
    /// file when it exists, or nothing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_config_file() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_config_file() -> Option<PathBuf> {
        ProjectDirs::from("plus", "proteins", "poseview")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Command-line values win over the file, the file wins over built-in defaults.
    pub fn merge_with_cli(self, cli: &Cli) -> Result<AppConfig> {
        let mut builder = ClientConfigBuilder::new();

        if let Some(endpoint) = cli.endpoint.clone().or(self.endpoint) {
            builder = builder.endpoint(endpoint);
        }
        if let Some(secs) = cli.timeout.or(self.timeout_secs) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = cli.poll_interval.or(self.poll_interval_ms) {
            builder = builder.poll_interval(Duration::from_millis(ms));
        }
        if let Some(dir) = cli.output_dir.clone().or(self.output_dir) {
            builder = builder.output_dir(dir);
        }

        let client = builder.build().map_err(JobError::from)?;
        let format = cli
            .format
            .clone()
            .or(self.format)
            .unwrap_or_else(|| ImageFormat::default().to_string());

        Ok(AppConfig { client, format })
    }
}
