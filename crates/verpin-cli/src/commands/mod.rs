//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function that takes the shared
//! CommandContext. The dispatcher matches the parsed subcommand and hands
//! off to the handler.

use std::path::PathBuf;
use tracing::info;

use verpin_core::{VerpinError, VerpinResult};

pub mod resolve;
pub mod show;

#[cfg(test)]
mod tests;

use crate::output::OutputHandler;
use crate::Commands;

/// Shared context for all commands
pub struct CommandContext {
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> Self {
        Self {
            output: OutputHandler::new(),
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> VerpinResult<()> {
    match command {
        Commands::Resolve(args) => {
            info!("Resolving specifiers for {}", args.package);
            resolve::execute(args, ctx).await
        },
        Commands::Show { manifest_file } => {
            info!("Showing stored manifest");
            show::execute(manifest_file, ctx).await
        },
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx).await
        },
    }
}

/// Default manifest location under the user cache directory
pub fn default_manifest_path() -> VerpinResult<PathBuf> {
    let cache_dir = dirs::cache_dir().ok_or_else(|| {
        VerpinError::manifest_io(
            "versions.json",
            "Could not determine the user cache directory",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no cache directory"),
        )
    })?;

    Ok(cache_dir.join("verpin").join("versions.json"))
}

async fn show_version(ctx: &CommandContext) -> VerpinResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.info(&format!("verpin v{}", version));
    ctx.output.info(&format!("Built: {}", build_date));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}
