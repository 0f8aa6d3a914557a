//! Manifest store trait and implementations
//!
//! The store owns the on-disk JSON contract: an object keyed by full
//! version string in manifest (descending) order, two-space indented,
//! ending in a newline. Stored key order is never trusted on read; the
//! manifest deserializer re-sorts before a value can exist.

use dashmap::DashMap;
use std::fs;
use std::path::{Path, PathBuf};

use verpin_core::types::Manifest;
use verpin_core::VerpinError;

use crate::StoreResult;

/// Persistence seam for resolved manifests
pub trait ManifestStore {
    /// Read the manifest at `path`, recomputing entry order
    fn read(&self, path: &Path) -> StoreResult<Manifest>;

    /// Write `manifest` to `path`, replacing any existing file whole
    fn write(&self, path: &Path, manifest: &Manifest) -> StoreResult<()>;

    /// Check whether a manifest exists at `path`
    fn exists(&self, path: &Path) -> bool;
}

/// Render a manifest exactly as it is stored
fn render(path: &Path, manifest: &Manifest) -> StoreResult<String> {
    let mut rendered = serde_json::to_string_pretty(manifest).map_err(|e| {
        VerpinError::manifest_io(
            path,
            format!("Failed to serialize manifest: {}", e),
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        )
    })?;
    rendered.push('\n');
    Ok(rendered)
}

/// Parse stored manifest text, classifying schema failures as parse errors
fn parse(path: &Path, content: &str) -> StoreResult<Manifest> {
    serde_json::from_str(content).map_err(|e| VerpinError::manifest_parse(path, e.to_string()))
}

/// Filesystem-backed manifest store
///
/// Writes are atomic: the manifest is written to a sibling temporary file
/// and renamed over the target, so a reader never observes a partial
/// manifest even when a write is interrupted.
#[derive(Debug, Clone, Default)]
pub struct FsManifestStore;

impl FsManifestStore {
    /// Create a filesystem store
    pub fn new() -> Self {
        Self
    }
}

impl ManifestStore for FsManifestStore {
    fn read(&self, path: &Path) -> StoreResult<Manifest> {
        let content = fs::read_to_string(path)
            .map_err(|e| VerpinError::manifest_io(path, "Failed to read manifest file", e))?;
        parse(path, &content)
    }

    fn write(&self, path: &Path, manifest: &Manifest) -> StoreResult<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    VerpinError::manifest_io(path, "Failed to create manifest directory", e)
                })?;
            }
        }

        let content = render(path, manifest)?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)
            .map_err(|e| VerpinError::manifest_io(&temp_path, "Failed to write manifest file", e))?;
        fs::rename(&temp_path, path)
            .map_err(|e| VerpinError::manifest_io(path, "Failed to replace manifest file", e))?;

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory manifest store for tests
///
/// Holds the same rendered JSON text the filesystem store would write,
/// so both implementations share one contract.
#[derive(Debug, Default)]
pub struct MemoryManifestStore {
    files: DashMap<PathBuf, String>,
}

impl MemoryManifestStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ManifestStore for MemoryManifestStore {
    fn read(&self, path: &Path) -> StoreResult<Manifest> {
        match self.files.get(path) {
            Some(content) => parse(path, content.value()),
            None => Err(VerpinError::manifest_io(
                path,
                "Failed to read manifest file",
                std::io::Error::new(std::io::ErrorKind::NotFound, "no manifest stored"),
            )),
        }
    }

    fn write(&self, path: &Path, manifest: &Manifest) -> StoreResult<()> {
        let content = render(path, manifest)?;
        self.files.insert(path.to_path_buf(), content);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
