//! Content sources: where cache misses are filled from.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::content::Filters;
use crate::error::{CacheError, Result};

/// Something that can produce the JSON payload for a resource.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches `resource` with the given filters. The payload is opaque.
    async fn fetch(&self, resource: &str, filters: &Filters) -> Result<Value>;
}

// == HTTP Content Source ==
/// Fetches content from the storefront's REST backend.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentSource {
    /// Creates a source rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CacheError::Internal(format!("building HTTP client: {}", err)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL a resource is fetched from, before filters are appended.
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_start_matches('/'))
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, resource: &str, filters: &Filters) -> Result<Value> {
        let url = self.resource_url(resource);
        debug!(%url, ?filters, "fetching content from upstream");

        let response = self.client.get(&url).query(filters).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Upstream(format!(
                "{} returned {}",
                url, status
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}
