mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use clap::{CommandFactory, Parser};
use indicatif::{MultiProgress, ProgressDrawTarget};
use std::ffi::OsString;
use tracing::{debug, error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run_app(std::env::args_os()).await {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app<I>(args: I) -> Result<()>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = Cli::parse_from(cli::normalize_args(args));

    let Some((structure_code, ligand)) = cli.job_target() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let progress = MultiProgress::new();
    if cli.quiet {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref(), &progress)?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    debug!(
        "PoseView CLI v{} starting up with arguments: {:?}",
        env!("CARGO_PKG_VERSION"),
        &cli
    );
    if !cli.extra_args.is_empty() {
        debug!("Ignoring extra positional arguments: {:?}", cli.extra_args);
    }
    info!(
        "Requesting PoseView diagram for structure '{}' (ligand: '{}')",
        structure_code, ligand
    );

    let command_result = commands::render::run(&cli, &progress, structure_code, ligand).await;
    if let Err(e) = &command_result {
        error!("❌ Command failed: {}", e);
    }
    command_result
}
