//! Cache Module
//!
//! The cache seam of the flag service plus an in-memory implementation with
//! TTL expiration and LRU eviction.

mod entry;
mod lru;
mod memory;
mod stats;
mod store;


use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryFlagCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Flag Cache Trait ==
/// Key-value cache with per-key expiry, shared across requests.
///
/// Implementations report an unreachable backend as
/// [`FlagError::BackendUnavailable`](crate::error::FlagError::BackendUnavailable).
#[async_trait]
pub trait FlagCache: Send + Sync {
    /// Returns the cached value, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<bool>>;

    /// Stores `value` under `key` for `ttl_seconds`.
    async fn set(&self, key: &str, value: bool, ttl_seconds: u64) -> Result<()>;

    /// Removes `key`. Absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
