use crate::config::ConfigError;
use crate::models::ImageFormat;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JobError>;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("PoseView service error: {message}")]
    Service { message: String },

    #[error("Unsupported output format '{0}' (expected png, pdf or svg)")]
    InvalidFormat(String),

    #[error("Failed to write '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Service response did not include a location to poll")]
    MissingLocation,

    #[error("Finished job has no {0} artifact")]
    MissingArtifact(ImageFormat),

    #[error("Cannot derive a file name from artifact URL '{0}'")]
    InvalidArtifactUrl(String),

    #[error("Unexpected job status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
