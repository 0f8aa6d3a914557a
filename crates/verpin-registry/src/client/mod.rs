//! HTTP client for the two read-only registry queries
//!
//! The client performs no retries and no backoff: a single failed query is
//! surfaced immediately as `RegistryUnavailable`. Callers that need a
//! tighter bound than the built-in request timeout can wrap the calls in
//! their own timeout; the futures are cancel-safe and have no side effects.

use reqwest::{Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use verpin_core::error::VerpinError;

use crate::api::{RegistrySnapshot, VersionsPayload};
use crate::RegistryResult;

/// Default public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for registry version queries
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Base registry URL without a trailing slash
    base_url: String,
}

impl RegistryClient {
    /// Create a client against the public npm registry
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client against a custom registry base URL
    pub fn with_base_url(base_url: impl Into<String>) -> RegistryResult<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with explicit base URL and request timeout
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> RegistryResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .gzip(true)
            .user_agent(concat!("verpin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VerpinError::registry_with("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every published version string for a package
    pub async fn fetch_versions(&self, package: &str) -> RegistryResult<Vec<String>> {
        let url = format!(
            "{}/{}/versions",
            self.base_url,
            self.encode_package_name(package)
        );
        debug!("Fetching published versions for {} from {}", package, url);

        let payload: VersionsPayload = self.get_json(&url, package).await?;
        let versions = payload.into_versions();
        if versions.is_empty() || (versions.len() == 1 && versions[0].is_empty()) {
            return Err(VerpinError::registry(format!(
                "Registry returned no versions for '{}'",
                package
            )));
        }
        Ok(versions)
    }

    /// Fetch the dist-tag map for a package
    pub async fn fetch_dist_tags(&self, package: &str) -> RegistryResult<HashMap<String, String>> {
        let url = format!(
            "{}/{}/dist-tags",
            self.base_url,
            self.encode_package_name(package)
        );
        debug!("Fetching dist-tags for {} from {}", package, url);

        self.get_json(&url, package).await
    }

    /// Fetch the full registry snapshot for one resolution run
    ///
    /// Two sequential queries, versions first. The snapshot is transient
    /// and never persisted.
    pub async fn fetch_snapshot(&self, package: &str) -> RegistryResult<RegistrySnapshot> {
        let versions = self.fetch_versions(package).await?;
        let dist_tags = self.fetch_dist_tags(package).await?;
        Ok(RegistrySnapshot {
            versions,
            dist_tags,
        })
    }

    /// Issue one GET and decode the JSON body
    async fn get_json<T>(&self, url: &str, package: &str) -> RegistryResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("Request timed out querying '{}'", package)
            } else {
                format!("Failed to reach registry for '{}'", package)
            };
            VerpinError::registry_with(message, e)
        })?;

        match response.status() {
            reqwest::StatusCode::OK => response.json::<T>().await.map_err(|e| {
                VerpinError::registry_with(
                    format!("Malformed registry response for '{}'", package),
                    e,
                )
            }),
            status => Err(VerpinError::registry(format!(
                "Registry returned status {} for '{}'",
                status, package
            ))),
        }
    }

    /// Encode package name for URL (handle scoped packages)
    fn encode_package_name(&self, name: &str) -> String {
        if name.starts_with('@') {
            // Scoped package: @org/pkg -> @org%2fpkg
            name.replace('/', "%2f")
        } else {
            name.to_string()
        }
    }
}
