//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Reads re-check expiry on their own, so the sweep only bounds how long
//! unread expired entries keep holding memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. It holds the write lock only for the duration of a sweep.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `cleanup_interval_secs` - Interval in seconds between sweeps (minimum 1)
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::new(1000)?));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.sweep_expired();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "TTL sweep removed expired entries");
            } else {
                debug!(remaining, "TTL sweep found no expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn shared(max_items: usize) -> SharedCache {
        Arc::new(RwLock::new(CacheStore::new(max_items).unwrap()))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = shared(100);

        cache.write().await.put("expire_soon", "value", Some(1));

        let handle = spawn_cleanup_task(cache.clone(), 1);

        // Wait for entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let cache_guard = cache.read().await;
            assert!(
                !cache_guard.contains("expire_soon"),
                "Expired entry should have been swept"
            );
            let stats = cache_guard.stats();
            assert_eq!(stats.expired_removals, 1);
            // Removed by the sweep, not by a read
            assert_eq!(stats.misses, 0);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = shared(100);

        cache.write().await.put("long_lived", "value", Some(3600));
        cache.write().await.put("forever", "value", None);

        let handle = spawn_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut cache_guard = cache.write().await;
            assert_eq!(
                cache_guard.get("long_lived").as_deref(),
                Some(&b"value"[..]),
                "Valid entry should not be removed"
            );
            assert!(cache_guard.contains("forever"));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(shared(100), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
