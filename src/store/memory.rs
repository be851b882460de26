//! In-process feature store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{FlagError, Result};
use crate::models::{Feature, NewFeature};
use crate::store::FeatureStore;

/// [`FeatureStore`] kept in a `BTreeMap`, so listing is name-ordered for free.
///
/// Used when no database is configured, and throughout the tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeatureStore {
    features: Arc<RwLock<BTreeMap<String, Feature>>>,
}

impl MemoryFeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `(name, enabled)` pairs.
    pub fn with_features<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let map = features
            .into_iter()
            .map(|(name, enabled)| {
                let feature = Feature::from_new(NewFeature::new(name, enabled));
                (feature.name.clone(), feature)
            })
            .collect();

        Self {
            features: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl FeatureStore for MemoryFeatureStore {
    async fn get(&self, name: &str) -> Result<Option<Feature>> {
        Ok(self.features.read().await.get(name).cloned())
    }

    async fn list(&self) -> Result<Vec<Feature>> {
        Ok(self.features.read().await.values().cloned().collect())
    }

    async fn insert(&self, new: NewFeature) -> Result<Feature> {
        let mut features = self.features.write().await;
        if features.contains_key(&new.name) {
            return Err(FlagError::Conflict(new.name));
        }

        let feature = Feature::from_new(new);
        features.insert(feature.name.clone(), feature.clone());
        Ok(feature)
    }

    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<Option<Feature>> {
        let mut features = self.features.write().await;
        Ok(features.get_mut(name).map(|feature| {
            feature.enabled = enabled;
            feature.updated_at = Utc::now();
            feature.clone()
        }))
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.features.write().await.remove(name).is_some())
    }
}
