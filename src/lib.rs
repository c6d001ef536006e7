//! Content Cache - read-through response cache for storefront content
//!
//! Memoizes backend responses with TTL expiry, lazy eviction, a background
//! sweep and glob-pattern invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::ResponseCache;
pub use config::Config;
pub use tasks::spawn_sweep_task;
