//! Version specifier resolution engine for verpin
//!
//! This crate turns requested version specifiers (dist-tags, partial
//! patterns, exact versions) into a pinned release manifest: dist-tag
//! lookup first, partial-semver matching as the fallback, deduplication,
//! semver decomposition and deterministic descending ordering.

pub mod matcher;
pub mod resolve;

// Re-export main types
pub use matcher::match_version;
pub use resolve::{ResolveRequest, Resolver};

use verpin_core::error::VerpinError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, VerpinError>;
