//! Cache Statistics Module
//!
//! Tracks lookup outcomes and how entries leave the cache.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing cache activity since construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a fresh value
    pub hits: u64,
    /// Lookups that found nothing or found an expired entry
    pub misses: u64,
    /// Entries dropped because their TTL elapsed (lazily or by the sweep)
    pub expirations: u64,
    /// Entries dropped by delete, pattern invalidation or clear
    pub invalidations: u64,
    /// Live entries at the time the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    /// Updates the live entry count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.expirations, 0);
        assert_eq!(stats.invalidations, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_removal_counters_accumulate() {
        let mut stats = CacheStats::new();
        stats.record_expirations(2);
        stats.record_expirations(1);
        stats.record_invalidations(4);
        assert_eq!(stats.expirations, 3);
        assert_eq!(stats.invalidations, 4);
    }

    #[test]
    fn test_serializes_all_counters() {
        let mut stats = CacheStats::new();
        stats.set_total_entries(42);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_entries"], 42);
        assert_eq!(json["invalidations"], 0);
    }
}
