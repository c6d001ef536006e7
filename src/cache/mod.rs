//! Cache Module
//!
//! In-memory response cache with TTL expiry, lazy eviction on read and
//! glob-pattern invalidation.

mod entry;
mod pattern;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{is_expired, CacheEntry};
pub use pattern::{pattern_matches, MATCH_ALL};
pub use shared::ResponseCache;
pub use stats::CacheStats;
pub use store::CacheStore;
