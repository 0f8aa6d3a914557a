//! npm registry client for verpin
//!
//! This crate provides the two read-only registry queries the resolver
//! needs: the published-versions list and the dist-tag map. Responses are
//! fetched fresh for every resolution; nothing is cached or mirrored, and
//! a failed query is surfaced immediately without retries.

pub mod client;
pub mod api;

// Re-export main types
pub use client::{RegistryClient, DEFAULT_REGISTRY_URL};
pub use api::{RegistrySnapshot, VersionsPayload};

use verpin_core::error::VerpinError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, VerpinError>;
