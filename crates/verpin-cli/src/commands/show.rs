//! `verpin show` command implementation.
//!
//! Reads a stored manifest and prints its entries. The registry is never
//! contacted.

use std::path::PathBuf;

use verpin_core::VerpinResult;
use verpin_manifest::{FsManifestStore, ManifestStore};

use super::{default_manifest_path, CommandContext};

/// Execute the `verpin show` command
pub async fn execute(manifest_file: Option<PathBuf>, ctx: &CommandContext) -> VerpinResult<()> {
    let path = match manifest_file {
        Some(path) => path,
        None => default_manifest_path()?,
    };

    let manifest = FsManifestStore::new().read(&path)?;

    ctx.output.info(&format!(
        "Manifest {} ({} entries)",
        path.display(),
        manifest.len()
    ));

    for (version, meta) in manifest.entries() {
        let mut line = format!("  {}", version);
        if meta.is_prerelease() {
            line.push_str(" (prerelease)");
        }
        if let Some(debian) = &meta.debian_default {
            line.push_str(&format!(" debian={}", debian));
        }
        if let Some(alpine) = &meta.alpine_default {
            line.push_str(&format!(" alpine={}", alpine));
        }
        if !meta.variants.is_empty() {
            let names: Vec<&str> = meta.variants.keys().map(String::as_str).collect();
            line.push_str(&format!(" variants: {}", names.join(", ")));
        }
        ctx.output.info(&line);
    }

    if let Some((newest, _)) = manifest.newest() {
        ctx.output.success(&format!("Newest pinned release: {}", newest));
    }

    Ok(())
}
