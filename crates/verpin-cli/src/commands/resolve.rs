//! `verpin resolve` command implementation.
//!
//! Resolves the requested specifiers into pinned versions and writes the
//! manifest. When a valid manifest already exists at the output path and
//! no refresh was requested, the registry is not contacted at all.

use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;

use verpin_core::types::Manifest;
use verpin_core::VerpinResult;
use verpin_manifest::{FsManifestStore, ManifestStore};
use verpin_registry::{RegistryClient, DEFAULT_REGISTRY_URL};
use verpin_resolver::{ResolveRequest, Resolver};

use super::{default_manifest_path, CommandContext};

/// Architectures assumed when variants are requested without any --arch
const DEFAULT_ARCHES: [&str; 2] = ["amd64", "arm64v8"];

/// Arguments for `verpin resolve`
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Package whose published versions are queried
    pub package: String,

    /// Version specifier: a dist-tag, partial version or exact version; repeatable
    #[arg(short = 's', long = "spec")]
    pub spec: Vec<String>,

    /// Comma-separated specifiers, combined after --spec
    #[arg(long)]
    pub specs: Option<String>,

    /// Manifest output path (defaults to the user cache directory)
    #[arg(long)]
    pub manifest_file: Option<PathBuf>,

    /// Registry base URL
    #[arg(long, default_value = DEFAULT_REGISTRY_URL)]
    pub registry: String,

    /// Query the registry even when a manifest already exists
    #[arg(long)]
    pub refresh: bool,

    /// Pre-resolved manifest to use instead of querying the registry
    #[arg(long, env = "VERPIN_MANIFEST_FILE")]
    pub use_manifest: Option<PathBuf>,

    /// Default Debian suite recorded in every entry
    #[arg(long)]
    pub debian_default: Option<String>,

    /// Default Alpine release recorded in every entry
    #[arg(long)]
    pub alpine_default: Option<String>,

    /// Build variant name; repeatable
    #[arg(long = "variant")]
    pub variant: Vec<String>,

    /// Architecture targeted by every variant; repeatable
    #[arg(long = "arch")]
    pub arch: Vec<String>,
}

/// Execute the `verpin resolve` command
pub async fn execute(args: ResolveArgs, ctx: &CommandContext) -> VerpinResult<()> {
    let start_time = Instant::now();

    let store = FsManifestStore::new();
    let manifest_path = match args.manifest_file.clone() {
        Some(path) => path,
        None => default_manifest_path()?,
    };

    let manifest = obtain_manifest(&args, &store, &manifest_path, ctx).await?;

    if manifest.is_empty() {
        ctx.output.warn("Manifest has no entries");
    }
    for (version, meta) in manifest.entries() {
        if meta.is_prerelease() {
            ctx.output.info(&format!("  📌 {} (prerelease)", version));
        } else {
            ctx.output.info(&format!("  📌 {}", version));
        }
    }

    let duration = start_time.elapsed();
    ctx.output.success(&format!(
        "Pinned {} release(s) to {} in {:.2}s",
        manifest.len(),
        manifest_path.display(),
        duration.as_secs_f64()
    ));

    Ok(())
}

/// Produce the manifest for this invocation
///
/// Three paths, tried in order: an explicit pre-resolved manifest, the
/// cached manifest at the output path, and a fresh resolution. Only the
/// last one contacts the registry.
async fn obtain_manifest(
    args: &ResolveArgs,
    store: &FsManifestStore,
    manifest_path: &Path,
    ctx: &CommandContext,
) -> VerpinResult<Manifest> {
    if let Some(source) = &args.use_manifest {
        ctx.output
            .step("📋", &format!("Using pre-resolved manifest {}", source.display()));
        let manifest = store.read(source)?;
        store.write(manifest_path, &manifest)?;
        return Ok(manifest);
    }

    if store.exists(manifest_path) && !args.refresh {
        match store.read(manifest_path) {
            Ok(manifest) => {
                ctx.output.step("⚡", "Using cached manifest");
                return Ok(manifest);
            },
            Err(e) => {
                // An unreadable cache is replaced whole by a fresh resolution
                warn!("Ignoring manifest at {}: {}", manifest_path.display(), e);
                ctx.output.warn("Existing manifest is invalid, resolving again");
            },
        }
    }

    ctx.output.step(
        "🔍",
        &format!("Resolving {} against {}", args.package, args.registry),
    );
    let client = RegistryClient::with_base_url(&args.registry)?;
    let resolver = Resolver::new(client);
    let manifest = resolver.resolve(&build_request(args)).await?;

    store.write(manifest_path, &manifest)?;
    Ok(manifest)
}

/// Build the resolver request from the parsed arguments
fn build_request(args: &ResolveArgs) -> ResolveRequest {
    let mut request = ResolveRequest::new(&args.package, collect_specifiers(args));
    request.debian_default = args.debian_default.clone();
    request.alpine_default = args.alpine_default.clone();
    request.variants = args.variant.clone();
    request.arches = if args.arch.is_empty() && !args.variant.is_empty() {
        DEFAULT_ARCHES.iter().map(|a| a.to_string()).collect()
    } else {
        args.arch.clone()
    };
    request
}

/// Combine --spec occurrences with the --specs list, in order
///
/// Entries pass through verbatim; the resolver owns trimming and
/// empty-skipping, so its end-of-list semantics are not masked here.
fn collect_specifiers(args: &ResolveArgs) -> Vec<String> {
    let mut specifiers = args.spec.clone();
    if let Some(csv) = &args.specs {
        specifiers.extend(csv.split(',').map(str::to_string));
    }
    specifiers
}
