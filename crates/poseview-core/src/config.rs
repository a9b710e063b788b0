use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://proteins.plus/api/poseview_rest";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid service endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Parameter '{0}' must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Settings shared by every request a [`JobClient`](crate::client::JobClient) makes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: Url,
    /// Applied to both connecting and the whole request, for every call.
    pub timeout: Duration,
    /// Delay between two status requests while the job is processing.
    pub poll_interval: Duration,
    /// Directory the downloaded artifact is written into.
    pub output_dir: PathBuf,
    pub user_agent: String,
}

#[derive(Default)]
pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    output_dir: Option<PathBuf>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let raw_endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&raw_endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: raw_endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: raw_endpoint,
                reason: "only http and https are supported".to_string(),
            });
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("timeout"));
        }

        Ok(ClientConfig {
            endpoint,
            timeout,
            poll_interval: self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("poseview/{}", env!("CARGO_PKG_VERSION"))),
        })
    }
}
