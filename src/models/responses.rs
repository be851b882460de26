//! Response DTOs for the flag API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::Feature;

/// Response body for GET /features/:name
#[derive(Debug, Clone, Serialize)]
pub struct FlagResponse {
    pub name: String,
    pub enabled: bool,
}

impl FlagResponse {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }
}

/// Response body for GET /features, the snapshot handed to display contexts.
#[derive(Debug, Clone, Serialize)]
pub struct FeaturesResponse {
    pub features: BTreeMap<String, bool>,
}

/// Response body for admin mutations that return the affected record.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureResponse {
    /// Success message
    pub message: String,
    pub feature: Feature,
}

impl FeatureResponse {
    pub fn created(feature: Feature) -> Self {
        Self {
            message: format!("Feature '{}' created successfully", feature.name),
            feature,
        }
    }

    pub fn toggled(feature: Feature) -> Self {
        let state = if feature.enabled { "enabled" } else { "disabled" };
        Self {
            message: format!("Feature '{}' {} successfully", feature.name, state),
            feature,
        }
    }
}

/// Response body for admin operations that only acknowledge a name.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub name: String,
}

impl MessageResponse {
    pub fn deleted(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("Feature '{}' deleted successfully", name),
            name,
        }
    }

    pub fn invalidated(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("Cache for feature '{}' invalidated", name),
            name,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
