//! Partial-semver matching against published versions
//!
//! Implements the specifier-to-version selection rules: an exact string
//! hit wins outright, otherwise the specifier is treated as a partial
//! pattern and matched against stable releases only.

use semver::Version;
use std::cmp::Ordering;

use verpin_core::types::PartialSpec;

use crate::ResolverResult;

/// Find the best published version for a specifier
///
/// An exact byte-for-byte hit on a candidate returns immediately and is
/// the only way a prerelease can be selected. Otherwise the specifier is
/// parsed as a partial pattern (`InvalidSpecFormat` when it is neither a
/// candidate nor valid grammar) and the numeric components are matched
/// against every candidate. Prerelease candidates are excluded from
/// pattern matching unconditionally, even when the pattern itself carries
/// a prerelease component. The greatest match by semver precedence wins,
/// first-encountered on a precedence tie, and is returned in its original
/// textual form. `Ok(None)` means the filters eliminated every candidate.
pub fn match_version(spec: &str, candidates: &[String]) -> ResolverResult<Option<String>> {
    // Exact pin, prerelease included
    if candidates.iter().any(|candidate| candidate == spec) {
        return Ok(Some(spec.to_string()));
    }

    let pattern: PartialSpec = spec.parse()?;

    let mut best: Option<(&str, Version)> = None;
    for candidate in candidates {
        // Registry entries that are not valid semver cannot be pattern
        // matched; skip them rather than failing the run
        let parsed = match Version::parse(candidate) {
            Ok(parsed) => parsed,
            Err(_) => continue,
        };
        if !pattern.matches(&parsed) {
            continue;
        }
        if !parsed.pre.is_empty() {
            continue;
        }
        let replace = match best {
            // Strictly greater only, so the first of equal candidates is kept
            Some((_, ref current)) => parsed.cmp_precedence(current) == Ordering::Greater,
            None => true,
        };
        if replace {
            best = Some((candidate.as_str(), parsed));
        }
    }

    Ok(best.map(|(original, _)| original.to_string()))
}
