//! Version decomposition and partial-specifier types.
//!
//! Full version strings reported by the registry are parsed with the
//! `semver` crate; [`SemverParts`] is the decomposed, serializable form
//! written into the manifest. [`PartialSpec`] is the user-facing specifier
//! grammar `major[.minor[.patch[-prerelease][+build]]]` used for prefix
//! matching against published versions.

use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{VerpinError, VerpinResult};

/// Decomposed semantic-version fields of one resolved release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemverParts {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Prerelease identifiers, absent for stable releases
    #[serde(default)]
    pub pre: Option<String>,
    /// Build metadata, absent when the published version carries none
    #[serde(default)]
    pub build: Option<String>,
}

impl SemverParts {
    /// Decompose a full version string as published by the registry
    pub fn parse(full: &str) -> VerpinResult<Self> {
        let version = Version::parse(full)
            .map_err(|e| VerpinError::invalid_spec(full, e.to_string()))?;
        Ok(Self::from(&version))
    }
}

impl From<&Version> for SemverParts {
    fn from(version: &Version) -> Self {
        let pre = if version.pre.is_empty() {
            None
        } else {
            Some(version.pre.as_str().to_string())
        };
        let build = if version.build.is_empty() {
            None
        } else {
            Some(version.build.as_str().to_string())
        };
        Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            pre,
            build,
        }
    }
}

/// Partial version specifier (missing components mean "any")
///
/// Grammar: `major[.minor[.patch[-prerelease][+build]]]`. Numeric
/// components reject leading zeros; prerelease and build are only admitted
/// after all three numeric components. The `pre` and `build` fields are
/// accepted by the grammar but never consulted when filtering candidates:
/// prefix matching resolves to stable releases only, and a prerelease can
/// only be selected by requesting its exact version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSpec {
    pub major: u64,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre: Option<String>,
    pub build: Option<String>,
}

impl PartialSpec {
    /// Check whether a published version satisfies the numeric components
    pub fn matches(&self, candidate: &Version) -> bool {
        if candidate.major != self.major {
            return false;
        }
        if let Some(minor) = self.minor {
            if candidate.minor != minor {
                return false;
            }
        }
        if let Some(patch) = self.patch {
            if candidate.patch != patch {
                return false;
            }
        }
        true
    }
}

/// Parse one numeric component; leading zeros and signs are rejected
fn parse_numeric(component: &str) -> Option<u64> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if component.len() > 1 && component.starts_with('0') {
        return None;
    }
    component.parse().ok()
}

impl FromStr for PartialSpec {
    type Err = VerpinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split on '+' for build metadata; everything after the first '+'
        // belongs to it, so prerelease can never contain one
        let (version_part, build) = match s.split_once('+') {
            Some((v, b)) => (v, Some(b.to_string())),
            None => (s, None),
        };

        // Split on '-' for prerelease
        let (core_part, pre) = match version_part.split_once('-') {
            Some((c, p)) => (c, Some(p.to_string())),
            None => (version_part, None),
        };

        if let Some(ref p) = pre {
            if p.is_empty() {
                return Err(VerpinError::invalid_spec(s, "empty prerelease component"));
            }
        }

        let parts: Vec<&str> = core_part.split('.').collect();
        if parts.len() > 3 {
            return Err(VerpinError::invalid_spec(
                s,
                "expected at most major.minor.patch",
            ));
        }
        if (pre.is_some() || build.is_some()) && parts.len() != 3 {
            return Err(VerpinError::invalid_spec(
                s,
                "prerelease and build require all of major.minor.patch",
            ));
        }

        let numeric = |component: &str| {
            parse_numeric(component).ok_or_else(|| {
                VerpinError::invalid_spec(
                    s,
                    format!("'{}' is not a valid version component", component),
                )
            })
        };

        let major = numeric(parts[0])?;
        let minor = parts.get(1).map(|p| numeric(p)).transpose()?;
        let patch = parts.get(2).map(|p| numeric(p)).transpose()?;

        Ok(PartialSpec {
            major,
            minor,
            patch,
            pre,
            build,
        })
    }
}

impl fmt::Display for PartialSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        if let Some(ref pre) = self.pre {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}
