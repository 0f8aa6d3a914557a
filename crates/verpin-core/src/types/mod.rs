//! Core data types for the verpin resolution pipeline.
//!
//! This module provides the fundamental types used throughout verpin:
//! - Version decomposition and partial-specifier types
//! - Release metadata and manifest structures

pub mod release;
pub mod version;

// Re-export all public types
pub use release::{Manifest, ReleaseMeta};
pub use version::{PartialSpec, SemverParts};
