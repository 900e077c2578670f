//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::search::SearchArgs;
use super::{check, search};
use crate::domain::Axis;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "tq")]
#[command(author, version, about = "Filter tracker tickets by how they moved")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Tracker snapshot to search
    #[arg(long, global = true, env = "TQ_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search tickets by column, priority, status and project patterns
    Search(SearchArgs),

    /// Validate a pattern and print its normalized form
    Check {
        /// Axis the pattern is written for (column, priority, status, project)
        axis: Axis,

        /// Pattern to check
        pattern: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("tq starting");
    if let Some(dir) = Config::config_dir() {
        output.verbose_ctx("config", &format!("Config directory: {}", dir.display()));
    }

    match cli.command {
        Commands::Search(args) => {
            let snapshot = cli.snapshot.or_else(|| config.snapshot.clone());
            search::run(&output, &args, snapshot, &config)?
        }
        Commands::Check { axis, pattern } => check::run(&output, axis, &pattern)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
