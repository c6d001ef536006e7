//! Cache Store Module
//!
//! Synchronous cache engine: a HashMap of TTL-stamped entries with lazy
//! eviction on read, pattern invalidation and an explicit sweep.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{is_expired, pattern_matches, CacheEntry, CacheStats, MATCH_ALL};

// == Cache Store ==
/// Keyed storage of memoized values with per-entry freshness windows.
///
/// All methods take `&mut self`; share it across tasks through
/// [`ResponseCache`](crate::cache::ResponseCache).
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Activity counters
    stats: CacheStats,
    /// TTL applied by [`CacheStore::set`]
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store whose plain `set` uses `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores a value under the default TTL.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Stores or overwrites a value. The freshness window always restarts,
    /// even when the previous entry was still valid.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Returns a clone of the value if the entry exists and is still fresh.
    ///
    /// An expired entry is removed here and reported as a miss. Looking up a
    /// key that was never set does not create anything.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if self.lookup(key) {
            self.entries.get(key).map(|entry| entry.value.clone())
        } else {
            None
        }
    }

    /// Same outcome and side effects as [`CacheStore::get`], without the clone.
    pub fn has(&mut self, key: &str) -> bool {
        self.lookup(key)
    }

    /// Records the lookup and evicts the entry if it has expired.
    fn lookup(&mut self, key: &str) -> bool {
        let now = Instant::now();

        match self.entries.get(key).map(|entry| is_expired(entry, now)) {
            Some(false) => {
                self.stats.record_hit();
                true
            }
            Some(true) => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                debug!(key, "lazily evicted expired entry");
                false
            }
            None => {
                self.stats.record_miss();
                false
            }
        }
    }

    // == Delete ==
    /// Removes an entry. Returns whether one was actually stored.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.record_invalidations(1);
        }
        removed
    }

    // == Clear ==
    /// Removes every entry, fresh or not.
    pub fn clear(&mut self) {
        self.drain_all();
    }

    fn drain_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.record_invalidations(count);
        count
    }

    // == Invalidate By Pattern ==
    /// Removes every stored key matching `pattern` and returns how many went.
    ///
    /// Expired-but-unswept entries are matched too. `"*"` is a clear and
    /// reports the stored count at the time of the call.
    pub fn invalidate_by_pattern(&mut self, pattern: &str) -> usize {
        if pattern == MATCH_ALL {
            let count = self.drain_all();
            debug!(pattern, count, "invalidated all entries");
            return count;
        }

        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| pattern_matches(pattern, key))
            .cloned()
            .collect();

        for key in &matching {
            self.entries.remove(key);
        }

        let count = matching.len();
        self.stats.record_invalidations(count);
        debug!(pattern, count, "invalidated entries by pattern");
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns the number removed.
    ///
    /// Fresh entries are never touched.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| is_expired(entry, now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
        }

        let count = expired_keys.len();
        self.stats.record_expirations(count);
        count
    }

    // == Length ==
    /// Number of live entries. Expired entries awaiting eviction are not
    /// counted; see [`CacheStore::stored_len`] for the raw figure.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .values()
            .filter(|entry| !is_expired(entry, now))
            .count()
    }

    /// Number of entries physically held, including expired ones.
    pub fn stored_len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Stats ==
    /// Returns a snapshot of the counters with the current live count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }
}
