//! Manifest persistence for verpin
//!
//! This crate owns the durable form of a resolved manifest: a JSON object
//! keyed by full version string, written whole and read back with its
//! order recomputed. Persistence sits behind the [`ManifestStore`] trait
//! so callers never touch the filesystem directly.

pub mod store;

// Re-export main types
pub use store::{FsManifestStore, ManifestStore, MemoryManifestStore};

use verpin_core::VerpinError;

/// Result type for manifest store operations
pub type StoreResult<T> = Result<T, VerpinError>;
