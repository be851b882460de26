//! Feature Flags Module
//!
//! The flag evaluation service and the route guard built on it.

pub mod guard;
mod service;

pub use guard::{feature_required, require_feature, FeatureGate};
pub use service::{cache_key, FeatureService, CACHE_KEY_PREFIX, DEFAULT_CACHE_TTL};
