//! Periodic Cleanup Task
//!
//! Optional job that sweeps expired entries and prunes the tag index on a
//! fixed interval. The cache never schedules this itself; the server binary
//! starts it only when `CLEANUP_INTERVAL` is non-zero.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheManager;

/// Spawns a background task that periodically calls [`CacheManager::cleanup`].
///
/// # Arguments
/// * `cache` - Shared manager, the same one handed to the router
/// * `cleanup_interval_secs` - Interval in seconds between runs
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during shutdown.
///
/// # Example
/// ```ignore
/// let state = AppState::new(CacheManager::new(3600));
/// let cleanup_handle = spawn_cleanup_task(state.cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheManager>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, tag_count) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup();
                (removed, cache_guard.stats().tag_count)
            };

            if removed > 0 {
                info!(
                    "Scheduled cleanup: removed {} expired entries, {} tags remain",
                    removed, tag_count
                );
            } else {
                debug!("Scheduled cleanup: no expired entries found");
            }
        }
    })
}
