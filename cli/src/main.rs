#![deny(missing_docs)]

//! # opcov CLI
//!
//! Command Line Interface for the operation coverage reconciliation engine.
//!
//! Supported Commands:
//! - `check`: Contract vs. registry vs. service implementation drift report.
//! - `pipeline`: Runs the configured generation stages, then optionally `check`.

use clap::{Parser, Subcommand};
use opcov_core::AppResult;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::FileConfig;
use crate::pipeline::ShellExecutor;

mod check;
mod config;
mod error;
mod pipeline;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Operation coverage drift detector")]
struct Cli {
    /// Configuration file [default: ./opcov.yaml when present].
    #[clap(long, global = true, env = "OPCOV_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose diagnostics on stderr (overridden by RUST_LOG).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report drift between the API contract, the operation registry and the
    /// service implementations.
    ///
    /// Every GET operation registered for a service is expected to appear in
    /// the service file as `<access prefix><key>` (e.g. `operations.list`).
    /// This is a plain text search: references through aliases, spreads or
    /// computed keys are reported as missing, and mentions inside comments or
    /// strings count as references.
    ///
    /// Drift is advisory; the exit status is non-zero only when an input
    /// document cannot be read.
    Check(check::CheckArgs),
    /// Run the configured code-generation stages in order.
    Pipeline(pipeline::PipelineArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> AppResult<()> {
    let config = FileConfig::load(cli.config.as_deref(), Path::new("."))?;
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Check(args) => {
            check::execute(args, &config, &mut stdout)?;
        }
        Commands::Pipeline(args) => {
            // Injecting the real process runner
            pipeline::execute(args, &config, &ShellExecutor, &mut stdout)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
