//! Content loader combining the response cache, a content source and
//! optional demo content.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::ResponseCache;
use crate::content::{content_key, variants_pattern, ContentSource, Filters};
use crate::error::{CacheError, Result};

/// A resolved payload and whether it came from the demo fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub data: Value,
    pub fallback: bool,
}

// == Content Loader ==
/// Resolves content through the cache, the source and finally the fallback.
#[derive(Clone)]
pub struct ContentLoader {
    cache: ResponseCache<Value>,
    source: Arc<dyn ContentSource>,
    fallbacks: Arc<HashMap<String, Value>>,
}

impl ContentLoader {
    pub fn new(cache: ResponseCache<Value>, source: Arc<dyn ContentSource>) -> Self {
        Self {
            cache,
            source,
            fallbacks: Arc::new(HashMap::new()),
        }
    }

    /// Demo content served, uncached, when the source fails for a resource.
    pub fn with_fallbacks(mut self, fallbacks: HashMap<String, Value>) -> Self {
        self.fallbacks = Arc::new(fallbacks);
        self
    }

    pub fn cache(&self) -> &ResponseCache<Value> {
        &self.cache
    }

    // == Load ==
    /// Loads a resource, hitting the source only on a cache miss.
    ///
    /// `ttl` defaults to the cache's default TTL. A failed fetch is never
    /// cached; if demo content exists for the resource it is returned with
    /// `fallback` set, otherwise the source error is returned.
    pub async fn load(&self, resource: &str, filters: &Filters, ttl: Option<Duration>) -> Result<Content> {
        let key = content_key(resource, filters);
        let ttl = match ttl {
            Some(ttl) => ttl,
            None => self.cache.default_ttl().await,
        };

        let source = &self.source;
        let fetched = self
            .cache
            .cached_fetch(&key, || source.fetch(resource, filters), ttl)
            .await;

        match fetched {
            Ok(data) => Ok(Content {
                data,
                fallback: false,
            }),
            Err(err) => match self.fallbacks.get(resource) {
                Some(data) => {
                    warn!(resource, error = %err, "upstream failed, serving fallback content");
                    Ok(Content {
                        data: data.clone(),
                        fallback: true,
                    })
                }
                None => {
                    warn!(resource, error = %err, "upstream failed with no fallback");
                    Err(err)
                }
            },
        }
    }

    // == Invalidate Resource ==
    /// Drops the resource's unfiltered entry and every filtered variant.
    /// Call after a successful write to the backend.
    ///
    /// Other resources sharing the name as a prefix are left alone. Names
    /// containing `*` are rejected.
    pub async fn invalidate_resource(&self, resource: &str) -> Result<usize> {
        let pattern = variants_pattern(resource).ok_or_else(|| {
            CacheError::InvalidRequest(format!(
                "resource name '{}' must not contain '*'",
                resource
            ))
        })?;

        let mut removed = usize::from(self.cache.delete(resource).await);
        removed += self.cache.invalidate_by_pattern(&pattern).await;

        info!(resource, removed, "invalidated cached content");
        Ok(removed)
    }
}

/// Reads demo content: a JSON object mapping resource names to payloads.
pub fn load_fallbacks(path: &Path) -> anyhow::Result<HashMap<String, Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading fallback content from {}", path.display()))?;
    let fallbacks = serde_json::from_str(&raw)
        .with_context(|| format!("parsing fallback content in {}", path.display()))?;
    Ok(fallbacks)
}
