//! Release metadata and manifest structures.
//!
//! A [`Manifest`] maps pinned full-version strings to their [`ReleaseMeta`]
//! and is always held in descending semantic-version precedence order. The
//! order is recomputed whenever a manifest is built from stored data, so
//! JSON key order on disk is never load-bearing.

use indexmap::IndexMap;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{VerpinError, VerpinResult};
use crate::types::version::SemverParts;

/// Metadata for one pinned release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMeta {
    /// Exact version text as published by the registry
    pub full_version: String,
    /// Decomposed semantic-version fields
    pub version: SemverParts,
    /// Default Debian suite for image builds, present only with a build matrix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debian_default: Option<String>,
    /// Default Alpine release for image builds, present only with a build matrix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpine_default: Option<String>,
    /// Build variants mapped to the architectures they target
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: BTreeMap<String, Vec<String>>,
}

impl ReleaseMeta {
    /// Create a base-form entry with no build matrix
    pub fn new(full_version: impl Into<String>, version: SemverParts) -> Self {
        Self {
            full_version: full_version.into(),
            version,
            debian_default: None,
            alpine_default: None,
            variants: BTreeMap::new(),
        }
    }

    /// Check if this release is a prerelease
    pub fn is_prerelease(&self) -> bool {
        self.version.pre.is_some()
    }
}

/// Pinned-release manifest, ordered by descending version precedence
///
/// The entry map's iteration order is the manifest order, which makes the
/// "key set equals ordered sequence" invariant structural. Construction
/// goes through [`Manifest::from_entries`], which parses every key as full
/// semver and sorts, so an out-of-order or unparseable manifest value
/// cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: IndexMap<String, ReleaseMeta>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Build a manifest from entries in arbitrary order
    ///
    /// Keys are parsed as full semver and sorted descending. Build metadata
    /// refines precedence ties so the resulting order is total and
    /// deterministic.
    pub fn from_entries(entries: IndexMap<String, ReleaseMeta>) -> VerpinResult<Self> {
        let mut keyed: Vec<(Version, String, ReleaseMeta)> = Vec::with_capacity(entries.len());
        for (version, meta) in entries {
            let parsed = Version::parse(&version)
                .map_err(|e| VerpinError::invalid_spec(&version, e.to_string()))?;
            keyed.push((parsed, version, meta));
        }
        keyed.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(Self {
            entries: keyed.into_iter().map(|(_, v, m)| (v, m)).collect(),
        })
    }

    /// Number of pinned releases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the manifest has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Version strings in manifest order (descending precedence)
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in manifest order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ReleaseMeta)> {
        self.entries.iter().map(|(v, m)| (v.as_str(), m))
    }

    /// Look up the entry for an exact version string
    pub fn get(&self, version: &str) -> Option<&ReleaseMeta> {
        self.entries.get(version)
    }

    /// Highest-precedence entry, if any
    pub fn newest(&self) -> Option<(&str, &ReleaseMeta)> {
        self.entries().next()
    }
}

// Deserialization re-sorts, so stored key order is never trusted
impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = IndexMap::<String, ReleaseMeta>::deserialize(deserializer)?;
        Manifest::from_entries(entries).map_err(serde::de::Error::custom)
    }
}
