//! Specifier orchestration and manifest assembly
//!
//! One resolution run fetches a single registry snapshot, resolves every
//! requested specifier against it (dist-tag lookup first, partial match
//! second), deduplicates, decomposes, and returns an ordered manifest.
//! Resolution is all-or-nothing: the first failing specifier aborts the
//! run and nothing is produced.

use indexmap::IndexMap;
use std::collections::BTreeMap;
use tracing::{debug, info};

use verpin_core::types::{Manifest, ReleaseMeta, SemverParts};
use verpin_core::VerpinError;
use verpin_registry::{RegistryClient, RegistrySnapshot};

use crate::matcher::match_version;
use crate::ResolverResult;

/// Everything one resolution run needs, passed explicitly
///
/// There is no process-wide configuration; callers build a request and
/// hand it to [`Resolver::resolve`].
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Package whose versions are being pinned
    pub package: String,
    /// Requested specifiers in input order; an empty list means "latest"
    pub specifiers: Vec<String>,
    /// Default Debian suite stamped into every entry's build matrix
    pub debian_default: Option<String>,
    /// Default Alpine release stamped into every entry's build matrix
    pub alpine_default: Option<String>,
    /// Build variant names; each maps to the full arch list
    pub variants: Vec<String>,
    /// Architectures targeted by every variant
    pub arches: Vec<String>,
}

impl ResolveRequest {
    /// Create a request with no build matrix
    pub fn new(package: impl Into<String>, specifiers: Vec<String>) -> Self {
        Self {
            package: package.into(),
            specifiers,
            debian_default: None,
            alpine_default: None,
            variants: Vec::new(),
            arches: Vec::new(),
        }
    }
}

/// Orchestrates dist-tag lookup, partial matching and manifest assembly
#[derive(Debug, Clone)]
pub struct Resolver {
    client: RegistryClient,
}

impl Resolver {
    /// Create a resolver over a registry client
    pub fn new(client: RegistryClient) -> Self {
        Self { client }
    }

    /// Resolve every requested specifier into a pinned manifest
    pub async fn resolve(&self, request: &ResolveRequest) -> ResolverResult<Manifest> {
        let specifiers = normalize_specifiers(&request.specifiers);

        let snapshot = self.client.fetch_snapshot(&request.package).await?;

        let mut entries: IndexMap<String, ReleaseMeta> = IndexMap::new();
        for spec in &specifiers {
            let resolved = resolve_one(spec, &snapshot)?;
            if entries.contains_key(&resolved) {
                debug!("Specifier {} deduplicated into existing {}", spec, resolved);
                continue;
            }
            // A registry version that fails decomposition here would
            // poison the manifest, so the run fails instead
            let parts = SemverParts::parse(&resolved)?;
            entries.insert(resolved.clone(), build_entry(request, resolved, parts));
        }

        info!(
            "Resolved {} specifier(s) into {} release(s) for {}",
            specifiers.len(),
            entries.len(),
            request.package
        );
        Manifest::from_entries(entries)
    }
}

/// Assemble one manifest entry, attaching the build matrix when requested
fn build_entry(request: &ResolveRequest, full_version: String, parts: SemverParts) -> ReleaseMeta {
    let mut meta = ReleaseMeta::new(full_version, parts);
    meta.debian_default = request.debian_default.clone();
    meta.alpine_default = request.alpine_default.clone();
    let mut variants = BTreeMap::new();
    for variant in &request.variants {
        variants.insert(variant.clone(), request.arches.clone());
    }
    meta.variants = variants;
    meta
}

/// Trim requested specifiers and drop empties
///
/// The "latest" default applies only to an empty input list; a non-empty
/// list that trims away entirely resolves to an empty manifest.
fn normalize_specifiers(requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        return vec!["latest".to_string()];
    }
    requested
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve one specifier against the snapshot
///
/// Dist-tags are registry-authoritative and bypass semver filtering
/// entirely; only when no tag applies does the partial matcher run.
fn resolve_one(spec: &str, snapshot: &RegistrySnapshot) -> ResolverResult<String> {
    if let Some(tagged) = snapshot.dist_tags.get(spec) {
        if !tagged.is_empty() {
            debug!("Specifier {} is the dist-tag for {}", spec, tagged);
            return Ok(tagged.clone());
        }
    }
    match match_version(spec, &snapshot.versions)? {
        Some(version) => {
            debug!("Specifier {} matched {}", spec, version);
            Ok(version)
        },
        None => Err(VerpinError::no_match(spec)),
    }
}
