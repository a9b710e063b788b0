use crate::client::JobClient;
use crate::error::Result;
use crate::models::{ImageFormat, JobRequest};
use crate::progress::{Progress, ProgressReporter};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Outcome of a completed rendering job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub format: ImageFormat,
    pub path: PathBuf,
    /// Final message the service attached to the finished job.
    pub message: String,
}

/// Runs a full job: submit, wait until the service is done, download the artifact.
///
/// `format` is validated before anything is sent, so an unsupported format
/// never reaches the network.
#[instrument(skip_all, name = "render_workflow", fields(structure = request.structure_code()))]
pub async fn run(
    client: &JobClient,
    request: &JobRequest,
    format: &str,
    reporter: &ProgressReporter<'_>,
) -> Result<RenderResult> {
    let format: ImageFormat = format.parse()?;

    // === Phase 1: Submission ===
    reporter.report(Progress::PhaseStart {
        name: "Submitting job",
    });
    let submitted = client.submit(request).await?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Waiting for the renderer ===
    reporter.report(Progress::PhaseStart {
        name: "Waiting for PoseView",
    });
    let finished = client.poll_with_progress(&submitted, reporter).await?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Download ===
    reporter.report(Progress::PhaseStart {
        name: "Downloading artifact",
    });
    let path = client
        .fetch_with_progress(&finished, format, reporter)
        .await?;
    reporter.report(Progress::PhaseFinish);

    info!("Job complete, {} artifact saved to {:?}", format, path);
    Ok(RenderResult {
        format,
        path,
        message: finished.message,
    })
}
