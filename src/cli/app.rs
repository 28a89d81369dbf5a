//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use super::list_cmd::{self, ListCommands};
use super::output::{Output, OutputFormat};
use crate::storage::{Config, FlushMode};

#[derive(Parser)]
#[command(name = "listfile")]
#[command(author, version, about = "Edit a list stored one element per line in a text file")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Buffer changes and write the file once when the command finishes
    #[arg(long, global = true)]
    pub deferred: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "LISTFILE_CONFIG")]
    pub config: Option<PathBuf>,

    /// List file to operate on
    pub path: PathBuf,

    #[command(subcommand)]
    pub command: ListCommands,
}

impl Cli {
    /// Resolves the flush policy; `--deferred` wins over the config file
    pub fn flush_mode(&self, config: &Config) -> FlushMode {
        if self.deferred {
            FlushMode::Deferred
        } else {
            config.flush_mode()
        }
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);
    let mode = cli.flush_mode(&config);

    output.verbose_ctx(
        "open",
        &format!("Opening {} with {:?} flush", cli.path.display(), mode),
    );

    list_cmd::run(cli.command, &cli.path, mode, &output)?;

    output.verbose("Command completed successfully");
    Ok(())
}

/// Routes library debug events to stderr
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    // A subscriber may already be installed when running inside tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
