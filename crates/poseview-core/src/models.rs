use crate::error::JobError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP-style status code the service reports while a job is still running.
pub const STATUS_PROCESSING: u16 = 202;
/// Status code of a finished job whose artifacts are ready.
pub const STATUS_DONE: u16 = 200;

/// A PoseView rendering request for one structure and (optionally) one ligand.
///
/// Serializes to the nested shape the service expects:
/// `{"poseview":{"pdbCode":"2RGP","ligand":""}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRequest {
    poseview: PoseviewParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct PoseviewParams {
    #[serde(rename = "pdbCode")]
    pdb_code: String,
    ligand: String,
}

impl JobRequest {
    /// Creates a request. An empty `ligand` leaves the ligand choice to the service.
    pub fn new(structure_code: impl Into<String>, ligand: impl Into<String>) -> Self {
        Self {
            poseview: PoseviewParams {
                pdb_code: structure_code.into(),
                ligand: ligand.into(),
            },
        }
    }

    pub fn structure_code(&self) -> &str {
        &self.poseview.pdb_code
    }

    pub fn ligand(&self) -> &str {
        &self.poseview.ligand
    }
}

/// One response from the service, either to the initial submission or to a poll.
///
/// Every field is optional on the wire; missing or `null` fields decode to
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JobResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status_code: u16,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error: String,
    #[serde(rename = "result_png_picture", deserialize_with = "null_as_default")]
    pub png: String,
    #[serde(rename = "result_pdf_picture", deserialize_with = "null_as_default")]
    pub pdf: String,
    #[serde(rename = "result_svg_picture", deserialize_with = "null_as_default")]
    pub svg: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Typed view of [`JobResponse::status_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Processing,
    Done,
    Unexpected(u16),
}

impl From<u16> for JobStatus {
    fn from(code: u16) -> Self {
        match code {
            STATUS_PROCESSING => JobStatus::Processing,
            STATUS_DONE => JobStatus::Done,
            other => JobStatus::Unexpected(other),
        }
    }
}

impl JobResponse {
    pub fn status(&self) -> JobStatus {
        JobStatus::from(self.status_code)
    }

    /// A non-empty `error` field marks a terminal failure whatever the status code says.
    pub fn is_failure(&self) -> bool {
        !self.error.is_empty()
    }

    /// Human readable failure text, preferring the service message over the raw error.
    pub fn failure_message(&self) -> &str {
        if self.message.is_empty() {
            &self.error
        } else {
            &self.message
        }
    }

    /// Returns the artifact URL for `format`, or `None` when the service left it empty.
    pub fn artifact_url(&self, format: ImageFormat) -> Option<&str> {
        let url = match format {
            ImageFormat::Png => &self.png,
            ImageFormat::Pdf => &self.pdf,
            ImageFormat::Svg => &self.svg,
        };
        if url.is_empty() { None } else { Some(url) }
    }
}

/// Output formats the service can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Pdf,
    Svg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Pdf, ImageFormat::Svg];

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Pdf => "pdf",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageFormat::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| JobError::InvalidFormat(s.to_string()))
    }
}
