//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, bounding
//! memory for keys that are written once and never read again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// The sweep shares the expiry predicate with lazy eviction, so it never
/// removes a fresh entry. The returned handle is aborted on shutdown.
///
/// # Example
/// ```ignore
/// let cache = ResponseCache::<serde_json::Value>::new(Duration::from_secs(300));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: ResponseCache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "Starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
