use crate::cli::Cli;
use crate::config::PartialClientConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use indicatif::MultiProgress;
use poseview::client::JobClient;
use poseview::models::JobRequest;
use poseview::progress::ProgressReporter;
use poseview::workflows;
use tracing::debug;

pub async fn run(
    cli: &Cli,
    progress: &MultiProgress,
    structure_code: &str,
    ligand: &str,
) -> Result<()> {
    let partial_config = PartialClientConfig::load(cli.config.as_deref())?;
    debug!("Merging configuration from file and CLI arguments...");
    let app_config = partial_config.merge_with_cli(cli)?;

    let client = JobClient::new(app_config.client)?;
    let request = JobRequest::new(structure_code, ligand);

    let progress_handler = CliProgressHandler::new(progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = workflows::render::run(&client, &request, &app_config.format, &reporter).await?;

    progress.suspend(|| {
        println!(
            "✓ {} diagram for {} written to: {}",
            result.format.to_string().to_uppercase(),
            structure_code,
            result.path.display()
        )
    });
    Ok(())
}
