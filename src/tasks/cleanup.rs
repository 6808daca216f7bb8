//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cached responses.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically drops expired cache entries.
///
/// Serving never depends on this task: lookups already treat expired entries
/// as absent. The sweep only bounds how long stale bodies stay in memory.
///
/// # Arguments
/// * `cache` - shared reference to the response cache
/// * `cleanup_interval_secs` - seconds between sweeps, must be non-zero
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup_expired();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(
                    "Cache sweep: removed {} expired entries, {} remain",
                    removed, remaining
                );
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
