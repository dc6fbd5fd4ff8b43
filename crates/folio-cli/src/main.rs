//! # folio CLI entry point
//!
//! Parses command-line arguments, loads configuration, and dispatches to
//! subcommand handlers.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_cli::check::{run_check, CheckArgs};
use folio_cli::config::FolioConfig;
use folio_cli::schema::{run_schema, SchemaArgs};

/// folio: schema validation for site content collections.
///
/// Validates the `blog` and `projects` collections of a content directory
/// and exports their schemas as JSON Schema.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./folio.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every entry of the content directory.
    Check(CheckArgs),

    /// Print or write JSON Schemas for the collections.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    tracing::debug!(cwd = %cwd.display(), "folio starting");

    match run(cli, &cwd) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli, cwd: &Path) -> anyhow::Result<u8> {
    let config = FolioConfig::discover(cli.config.as_deref(), cwd)?;
    match cli.command {
        Commands::Check(args) => run_check(&args, &config, cwd),
        Commands::Schema(args) => run_schema(&args, &config, cwd),
    }
}
