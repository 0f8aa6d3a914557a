//! Error types and result aliases for verpin operations.
//!
//! Provides a unified error type covering every failure mode of the
//! resolution pipeline. Errors are terminal for the resolution that raised
//! them: either every requested specifier resolves and a complete manifest
//! is produced, or nothing is written.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all verpin operations
#[derive(Error, Debug)]
pub enum VerpinError {
    // Registry errors
    #[error("Registry unavailable: {message}")]
    RegistryUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Specifier errors
    #[error("Invalid version specifier '{spec}': {reason}")]
    InvalidSpecFormat { spec: String, reason: String },

    #[error("No published version matches '{spec}'")]
    NoMatchingVersion { spec: String },

    // Manifest errors
    #[error("Manifest IO error at {}: {message}", .path.display())]
    ManifestIo {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Manifest parse error at {}: {message}", .path.display())]
    ManifestParse { path: PathBuf, message: String },
}

/// Result type alias for verpin operations
pub type VerpinResult<T> = Result<T, VerpinError>;

impl VerpinError {
    /// Create a registry error without an underlying cause
    pub fn registry(message: impl Into<String>) -> Self {
        Self::RegistryUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a registry error from any error type
    pub fn registry_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::RegistryUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-specifier error
    pub fn invalid_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpecFormat {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create a no-matching-version error naming the offending specifier
    pub fn no_match(spec: impl Into<String>) -> Self {
        Self::NoMatchingVersion { spec: spec.into() }
    }

    /// Create a manifest IO error from std::io::Error
    pub fn manifest_io(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::ManifestIo {
            path: path.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a manifest parse error
    pub fn manifest_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ManifestParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            VerpinError::RegistryUnavailable { .. } => {
                Some("Check your internet connection and the registry URL, then try again")
            },
            VerpinError::InvalidSpecFormat { .. } => {
                Some("Specifiers are dist-tags or partial versions like 2026, 2026.2 or 2026.2.26")
            },
            VerpinError::NoMatchingVersion { .. } => {
                Some("Loosen the specifier or check which versions the package has published")
            },
            VerpinError::ManifestIo { .. } => {
                Some("Check permissions on the manifest file and its parent directory")
            },
            VerpinError::ManifestParse { .. } => {
                Some("Delete the manifest file to force a fresh resolution")
            },
        }
    }
}
