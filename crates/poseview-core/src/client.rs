//! HTTP client for the PoseView REST service.
//!
//! A job goes through three sequential calls: a `POST` that submits the
//! structure/ligand pair, repeated `GET`s of the returned location until the
//! job leaves the processing state, and a final `GET` of the rendered artifact.

use crate::config::ClientConfig;
use crate::error::{JobError, Result};
use crate::models::{ImageFormat, JobRequest, JobResponse, JobStatus};
use crate::progress::{Progress, ProgressReporter};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, trace};

const JSON_MIME: &str = "application/json";
/// Upper bound on the buffer reserved up front from a `Content-Length` header.
const MAX_PREALLOCATED_BYTES: u64 = 8 << 20;

#[derive(Debug, Clone)]
pub struct JobClient {
    http: Client,
    config: ClientConfig,
}

impl JobClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        debug!(
            "JobClient initialized for {} (timeout {:?}, poll interval {:?})",
            config.endpoint, config.timeout, config.poll_interval
        );
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submits a new rendering job and returns the service's first answer,
    /// which carries the location to poll.
    pub async fn submit(&self, request: &JobRequest) -> Result<JobResponse> {
        debug!(
            "Submitting job for structure '{}' with ligand '{}' to {}",
            request.structure_code(),
            request.ligand(),
            self.config.endpoint
        );
        let response = self
            .http
            .post(self.config.endpoint.clone())
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
            .json(request)
            .send()
            .await?;

        let result = Self::decode(response).await?;
        info!("{}", result.message);
        Ok(result)
    }

    /// Fetches the current state of the job at `location` once.
    pub async fn poll_once(&self, location: &str) -> Result<JobResponse> {
        trace!("Requesting job status from {}", location);
        let response = self
            .http
            .get(location)
            .header(ACCEPT, JSON_MIME)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Polls the job started by `initial` until it is done.
    pub async fn poll(&self, initial: &JobResponse) -> Result<JobResponse> {
        self.poll_with_progress(initial, &ProgressReporter::new())
            .await
    }

    /// Like [`poll`](Self::poll), reporting each "still processing" message.
    ///
    /// Every iteration re-issues the `GET`, so the loop always inspects the
    /// latest status rather than the one seen before waiting.
    pub async fn poll_with_progress(
        &self,
        initial: &JobResponse,
        reporter: &ProgressReporter<'_>,
    ) -> Result<JobResponse> {
        if initial.location.is_empty() {
            return Err(JobError::MissingLocation);
        }

        let mut attempt: u32 = 1;
        loop {
            let current = self.poll_once(&initial.location).await?;
            match current.status() {
                JobStatus::Done => {
                    debug!("Job finished after {} status request(s)", attempt);
                    return Ok(current);
                }
                JobStatus::Processing => {
                    debug!("{}", current.message);
                    reporter.report(Progress::StatusUpdate {
                        text: current.message,
                    });
                    tokio::time::sleep(self.config.poll_interval).await;
                    attempt += 1;
                }
                JobStatus::Unexpected(status) => {
                    return Err(JobError::UnexpectedStatus {
                        status,
                        message: current.message,
                    });
                }
            }
        }
    }

    /// Downloads the `format` artifact of a finished job into the output
    /// directory and returns the written path.
    pub async fn fetch(&self, response: &JobResponse, format: ImageFormat) -> Result<PathBuf> {
        self.fetch_with_progress(response, format, &ProgressReporter::new())
            .await
    }

    pub async fn fetch_with_progress(
        &self,
        response: &JobResponse,
        format: ImageFormat,
        reporter: &ProgressReporter<'_>,
    ) -> Result<PathBuf> {
        let url = response
            .artifact_url(format)
            .ok_or(JobError::MissingArtifact(format))?;
        let file_name = artifact_file_name(url)?;
        let path = self.config.output_dir.join(&file_name);

        debug!("Downloading {} artifact from {}", format, url);
        let download = self.http.get(url).send().await?.error_for_status()?;

        let total_bytes = download.content_length();
        reporter.report(Progress::DownloadStart { total_bytes });

        let mut downloaded: u64 = 0;
        let capacity = total_bytes.map_or(0, |n| n.min(MAX_PREALLOCATED_BYTES));
        let mut buffer: Vec<u8> = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));
        let mut stream = download.bytes_stream();
        while let Some(item) = stream.next().await {
            let chunk = item?;
            buffer.extend_from_slice(&chunk);
            downloaded += chunk.len() as u64;
            reporter.report(Progress::DownloadProgress { downloaded });
        }
        reporter.report(Progress::DownloadFinish);

        fs::write(&path, &buffer).map_err(|source| JobError::Write {
            path: path.clone(),
            source,
        })?;

        info!("Loaded {}", file_name);
        Ok(path)
    }

    async fn decode(response: reqwest::Response) -> Result<JobResponse> {
        let http_status = response.status();
        let body = response.bytes().await?;
        trace!("Received {} bytes with HTTP status {}", body.len(), http_status);

        let parsed: JobResponse = serde_json::from_slice(&body)?;
        if parsed.is_failure() {
            return Err(JobError::Service {
                message: parsed.failure_message().to_string(),
            });
        }
        Ok(parsed)
    }
}

/// Name of the local file for an artifact: the last non-empty path segment of its URL.
pub fn artifact_file_name(url: &str) -> Result<String> {
    let invalid = || JobError::InvalidArtifactUrl(url.to_string());
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .filter(|name| *name != "." && *name != "..")
        .map(str::to_string)
        .ok_or_else(invalid)
}
