use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "poseview",
    version,
    about = "PoseView CLI - Render 2D protein-ligand interaction diagrams with the proteins.plus PoseView service.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Select a structure from the Protein Data Bank (PDB) via its PDB code
    #[arg(value_name = "PDB")]
    pub structure_code: Option<String>,

    /// Set a ligand with respect to the specified PDB code, or "" to let the service choose
    #[arg(value_name = "LIGAND")]
    pub ligand: Option<String>,

    /// Positional arguments after the ligand are accepted and ignored
    #[arg(value_name = "EXTRA", hide = true)]
    pub extra_args: Vec<String>,

    /// Format of the downloaded file {png|pdf|svg} [default: png]
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Directory the downloaded file is written to [default: current directory]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to a configuration file in TOML format
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the PoseView service endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Per-request connect and transfer timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Delay between job status requests in milliseconds [default: 1000]
    #[arg(long, value_name = "MILLIS")]
    pub poll_interval: Option<u64>,

    /// Increase verbosity level (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Returns the structure code and ligand when both positionals were given.
    pub fn job_target(&self) -> Option<(&str, &str)> {
        match (&self.structure_code, &self.ligand) {
            (Some(code), Some(ligand)) => Some((code.as_str(), ligand.as_str())),
            _ => None,
        }
    }
}

/// Rewrites the single-dash long flag `-format` (and `-format=VALUE`) to `--format`.
///
/// Every other argument is passed through untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-format") => OsString::from("--format"),
            Some(s) if s.starts_with("-format=") => OsString::from(format!("-{}", s)),
            _ => arg,
        })
        .collect()
}
