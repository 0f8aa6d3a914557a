//! Registry API response types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payload of the published-versions query
///
/// Some registries collapse a one-element list into a bare string; both
/// shapes are accepted and normalized into a list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum VersionsPayload {
    /// The usual shape: a JSON array of version strings
    Many(Vec<String>),
    /// Collapsed shape: a single version as a bare JSON string
    One(String),
}

impl VersionsPayload {
    /// Normalize into a list of version strings
    pub fn into_versions(self) -> Vec<String> {
        match self {
            VersionsPayload::Many(versions) => versions,
            VersionsPayload::One(version) => vec![version],
        }
    }
}

/// Transient snapshot of the registry state for one package
///
/// Fetched once per resolution run and dropped afterwards; never persisted.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    /// Every published full version string
    pub versions: Vec<String>,
    /// Dist-tag name mapped to the version it points at
    pub dist_tags: HashMap<String, String>,
}
