//! Cache Entry Module
//!
//! Defines a cached flag value with its expiry.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A cached flag value and when it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached enabled state
    pub value: bool,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a cache entry that expires `ttl_seconds` from now.
    ///
    /// Oversized TTLs saturate at `u64::MAX` milliseconds instead of wrapping.
    pub fn new(value: bool, ttl_seconds: u64) -> Self {
        let expires_at = current_timestamp_ms().saturating_add(ttl_seconds.saturating_mul(1000));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time,
    /// so a fully elapsed TTL never yields a hit.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
