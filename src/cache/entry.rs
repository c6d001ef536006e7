//! Cache Entry Module
//!
//! Defines a single memoized response together with its freshness window.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored value plus the moment it was written and how long it stays fresh.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was written
    pub created_at: Instant,
    /// How long the entry stays fresh after `created_at`
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::written_at(value, ttl, Instant::now())
    }

    /// Creates an entry with an explicit write time.
    pub fn written_at(value: V, ttl: Duration, created_at: Instant) -> Self {
        Self {
            value,
            created_at,
            ttl,
        }
    }
}

/// The one expiry predicate shared by lazy eviction and the background sweep.
///
/// An entry stays valid while `now - created_at <= ttl`, so a zero TTL entry
/// is expired as soon as any time has passed since it was written.
pub fn is_expired<V>(entry: &CacheEntry<V>, now: Instant) -> bool {
    now.saturating_duration_since(entry.created_at) > entry.ttl
}
