//! Store Module
//!
//! The durable side of the flag service: the [`FeatureStore`] seam and its
//! in-memory and SQLite implementations.

mod memory;
pub mod schema;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Feature, NewFeature};

pub use memory::MemoryFeatureStore;
pub use sqlite::SqliteFeatureStore;

/// Authoritative feature records, keyed by unique name.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Looks up a feature by exact name.
    async fn get(&self, name: &str) -> Result<Option<Feature>>;

    /// Every feature, ordered by name.
    async fn list(&self) -> Result<Vec<Feature>>;

    /// Inserts a new feature.
    ///
    /// Fails with [`FlagError::Conflict`](crate::error::FlagError::Conflict)
    /// when the name is taken.
    async fn insert(&self, new: NewFeature) -> Result<Feature>;

    /// Sets `enabled` and refreshes `updated_at`. Returns `None` for an
    /// unknown name.
    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<Option<Feature>>;

    /// Removes a feature. Returns whether it existed.
    async fn delete(&self, name: &str) -> Result<bool>;
}
