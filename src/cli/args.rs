//! Command line arguments for registry-check.
//!
//! `registry-check [OPTIONS] [REGISTRY]` is shorthand for
//! `registry-check check [OPTIONS] [REGISTRY]`.

use crate::platform::github::DEFAULT_API_URL;
use crate::{DEFAULT_OUTPUT_PATH, DEFAULT_REGISTRY_PATH};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parsed command line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "registry-check",
    version,
    about = "Validate the newest entry of the Flow builders team registry",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub check: CheckArgs,
}

impl Args {
    /// Options for the validation run, wherever they were given
    pub fn check_args(&self) -> &CheckArgs {
        match &self.command {
            Some(Command::Check(args)) => args,
            _ => &self.check,
        }
    }
}

/// Command to execute
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Validate the newest registry entry (default)
    Check(CheckArgs),
    /// List all checks
    List,
    /// Print version and build information
    Version,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Options for a validation run
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct CheckArgs {
    /// Registry file to validate
    #[arg(
        value_name = "REGISTRY",
        env = "REGISTRY_FILE",
        default_value = DEFAULT_REGISTRY_PATH
    )]
    pub registry: PathBuf,

    /// Registry file at the pull request's base revision; enables the single-new-entry check
    #[arg(long, value_name = "PATH")]
    pub base: Option<PathBuf>,

    /// Where to write the { isValid, errors } result
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Console output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// GitHub API token (raises the anonymous rate limit)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in milliseconds
    #[arg(long = "timeout", value_name = "MS", default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// Require wallets.evm and wallets.flow
    #[arg(long)]
    pub require_wallets: bool,

    /// Do not probe repositories for Flow ecosystem markers
    #[arg(long)]
    pub skip_ecosystem: bool,

    /// Only print failing checks
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print timings and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
