//! Journal Flags - feature flags for the journaling app
//!
//! A read-through TTL cache over a durable flag store, default-deny
//! evaluation, and route guards that hide disabled features behind 404s.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod flags;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{FlagError, Result};
pub use flags::{FeatureGate, FeatureService};
pub use tasks::spawn_cleanup_task;
