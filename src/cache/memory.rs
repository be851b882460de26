//! Shared in-process flag cache.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, FlagCache};
use crate::error::Result;

/// [`FlagCache`] backed by a [`CacheStore`] behind a tokio `RwLock`.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone)]
pub struct MemoryFlagCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryFlagCache {
    /// Creates a cache holding at most `max_entries` flags.
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Shared handle to the underlying store, used by the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    /// Snapshot of the cache counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

#[async_trait]
impl FlagCache for MemoryFlagCache {
    async fn get(&self, key: &str) -> Result<Option<bool>> {
        // Write lock: a lookup updates LRU order and counters.
        let mut store = self.store.write().await;
        Ok(store.get(key))
    }

    async fn set(&self, key: &str, value: bool, ttl_seconds: u64) -> Result<()> {
        let mut store = self.store.write().await;
        store.set(key.to_string(), value, ttl_seconds);
        debug!("cached {}={} for {}s", key, value, ttl_seconds);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let removed = self.store.write().await.delete(key);
        debug!("invalidated {} (present: {})", key, removed);
        Ok(())
    }
}
