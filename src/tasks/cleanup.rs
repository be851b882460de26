//! TTL Cleanup Task
//!
//! Background task that periodically removes expired flag cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps expired entries every
/// `cleanup_interval_secs` seconds.
///
/// Expired entries are already ignored on read; the sweep only bounds memory
/// held by flags nobody asks about any more. Abort the returned handle on
/// shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting flag cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                (cache_guard.cleanup_expired(), cache_guard.len())
            };

            if removed > 0 {
                info!(
                    "Flag cache cleanup: removed {} expired entries, {} remain",
                    removed, remaining
                );
            } else {
                debug!("Flag cache cleanup: no expired entries found");
            }
        }
    })
}
