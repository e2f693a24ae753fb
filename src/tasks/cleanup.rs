//! Expiry Sweep Task
//!
//! Background task that periodically drops expired cache entries.
//!
//! Expiry is already enforced on every read, so the sweep only bounds how
//! long expired entries keep occupying memory.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Cache, Clock};
use crate::config::CacheConfig;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// sweeps. It must be called from within a tokio runtime.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task; abort it to stop sweeping.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Cache::<String, String>::new());
/// let sweeper = spawn_cleanup_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_cleanup_task<K, V, C>(
    cache: Arc<Cache<K, V, C>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "Starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

/// Spawns the sweep task if `config` enables one.
///
/// Returns None when `cleanup_interval` is unset.
pub fn spawn_configured_cleanup<K, V, C>(
    cache: Arc<Cache<K, V, C>>,
    config: &CacheConfig,
) -> Option<JoinHandle<()>>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    config
        .cleanup_interval
        .map(|interval| spawn_cleanup_task(cache, interval))
}
