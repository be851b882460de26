//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use tracing::warn;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seconds a cached flag value stays valid
    pub flag_cache_ttl: u64,
    /// Maximum number of entries the flag cache can hold
    pub cache_max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// SQLite database file; the in-memory store is used when unset
    pub database_path: Option<PathBuf>,
    /// Flags created at startup when missing from the store
    pub seed_features: Vec<(String, bool)>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `FLAG_CACHE_TTL` - Cached flag lifetime in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `DATABASE_PATH` - SQLite file for durable flags (default: unset)
    /// - `SEED_FEATURES` - e.g. `enable_admin=true,enable_signup=false`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            flag_cache_ttl: parse_var("FLAG_CACHE_TTL").unwrap_or(defaults.flag_cache_ttl),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            seed_features: env::var("SEED_FEATURES")
                .map(|v| parse_seed_features(&v))
                .unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            flag_cache_ttl: 300,
            cache_max_entries: 1000,
            cleanup_interval: 1,
            database_path: None,
            seed_features: Vec::new(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Parses `name=bool` pairs separated by commas.
///
/// A bare name seeds the flag as disabled. Pairs with an unparseable value are
/// skipped with a warning.
pub fn parse_seed_features(raw: &str) -> Vec<(String, bool)> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter_map(|item| {
            let (name, value) = match item.split_once('=') {
                Some((name, value)) => (name.trim(), value.trim()),
                None => (item, "false"),
            };
            if name.is_empty() {
                return None;
            }
            match value.parse::<bool>() {
                Ok(enabled) => Some((name.to_string(), enabled)),
                Err(_) => {
                    warn!("Ignoring seed feature '{}': invalid value '{}'", name, value);
                    None
                }
            }
        })
        .collect()
}
