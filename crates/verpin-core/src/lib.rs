//! # verpin-core
//!
//! Core types and error taxonomy shared across all verpin crates.
//!
//! This crate provides:
//! - SemverParts and PartialSpec types for version decomposition and matching
//! - ReleaseMeta and Manifest types for the pinned-release manifest
//! - VerpinError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (SemverParts, PartialSpec, Manifest, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{VerpinError, VerpinResult};
pub use types::{Manifest, PartialSpec, ReleaseMeta, SemverParts};
