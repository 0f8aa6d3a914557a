//! # verpin-cli
//!
//! Command-line interface for verpin, the registry version pinner.
//!
//! This is the main entry point. It handles argument parsing, sets up
//! logging and error reporting, and dispatches to the command handlers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

mod commands;
mod output;

use commands::resolve::ResolveArgs;
use output::errors::ErrorFormatter;
use verpin_core::{VerpinError, VerpinResult};

/// Pin registry package versions into a reproducible manifest
#[derive(Parser)]
#[command(name = "verpin", version, about = "Pin registry versions into a manifest")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve specifiers against the registry and write the manifest
    Resolve(ResolveArgs),
    /// Display a stored manifest
    Show {
        /// Manifest path (defaults to the user cache directory)
        #[arg(long)]
        manifest_file: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting verpin v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run_cli(cli) {
        eprintln!("{}", ErrorFormatter::new().format_error(&err));
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> VerpinResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| VerpinError::registry_with("Failed to create async runtime", e))?;

    rt.block_on(async {
        let ctx = commands::CommandContext::new();
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "verpin_cli={},verpin_core={},verpin_registry={},verpin_resolver={},verpin_manifest={}",
            level, level, level, level, level
        ))
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Verpin encountered an unexpected error: {}", panic_info);
        eprintln!("Verpin crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/verpin-tool/verpin/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
