//! Shared Response Cache
//!
//! A cloneable handle around [`CacheStore`] that callers inject wherever they
//! need memoized fetches. Each operation holds the lock only for its own
//! duration; `cached_fetch` releases it while the fetch is in flight.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};

// == Response Cache ==
/// Thread-safe response cache shared by every caller holding a clone.
#[derive(Debug)]
pub struct ResponseCache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for ResponseCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<V: Clone> ResponseCache<V> {
    /// Creates an empty cache using `default_ttl` for plain `set` calls.
    pub fn new(default_ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(default_ttl))
    }

    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn default_ttl(&self) -> Duration {
        self.store.read().await.default_ttl()
    }

    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.store.write().await.set(key, value);
    }

    pub async fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.store.write().await.set_with_ttl(key, value, ttl);
    }

    /// Fresh value for `key`, or `None`. Expired entries are evicted.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.write().await.get(key)
    }

    pub async fn has(&self, key: &str) -> bool {
        self.store.write().await.has(key)
    }

    /// Returns whether an entry was removed.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    /// Live entry count.
    pub async fn size(&self) -> usize {
        self.store.read().await.len()
    }

    /// Stored entry count, expired-but-unevicted entries included.
    pub async fn stored_len(&self) -> usize {
        self.store.read().await.stored_len()
    }

    /// Removes every key matching the `*` glob and returns the count.
    pub async fn invalidate_by_pattern(&self, pattern: &str) -> usize {
        self.store.write().await.invalidate_by_pattern(pattern)
    }

    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Cached Fetch ==
    /// Read-through lookup.
    ///
    /// On a hit the cached value is returned and `fetch` is never called. On
    /// a miss `fetch` runs exactly once; a successful result is stored under
    /// `ttl` and returned, an error is returned unchanged and nothing is
    /// stored.
    ///
    /// Concurrent misses on the same key are not coalesced: each caller runs
    /// its own fetch and the last store wins.
    pub async fn cached_fetch<F, Fut, E>(&self, key: &str, fetch: F, ttl: Duration) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss, fetching");
        let value = fetch().await?;
        self.set_with_ttl(key, value.clone(), ttl).await;
        Ok(value)
    }
}
