//! Feature flag evaluation.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::FlagCache;
use crate::error::{FlagError, Result};
use crate::models::{Feature, NewFeature};
use crate::store::FeatureStore;

/// Prefix that namespaces flag entries in the shared cache.
pub const CACHE_KEY_PREFIX: &str = "feature_flag_";

/// Seconds a flag value stays cached after a read-through.
pub const DEFAULT_CACHE_TTL: u64 = 300;

/// Returns the cache key for a flag name.
pub fn cache_key(name: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, name)
}

// == Feature Service ==
/// Answers "is this flag on?" through a read-through cache over the store.
///
/// Unknown flags are off. Cheap to clone; clones share the same cache and
/// store handles.
#[derive(Clone)]
pub struct FeatureService {
    cache: Arc<dyn FlagCache>,
    store: Arc<dyn FeatureStore>,
    ttl_seconds: u64,
}

impl FeatureService {
    /// Creates a service with the default 300 second cache lifetime.
    pub fn new(cache: Arc<dyn FlagCache>, store: Arc<dyn FeatureStore>) -> Self {
        Self::with_ttl(cache, store, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(
        cache: Arc<dyn FlagCache>,
        store: Arc<dyn FeatureStore>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            cache,
            store,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    // == Is Enabled ==
    /// Reports whether `name` is enabled.
    ///
    /// A cached value (including `false`) is returned without touching the
    /// store. On a miss the store decides, a missing record counts as
    /// disabled, and the result is cached for the configured TTL.
    ///
    /// Concurrent misses for the same name may each read the store and
    /// refill the cache; they all write the same value.
    pub async fn is_enabled(&self, name: &str) -> Result<bool> {
        let key = cache_key(name);

        if let Some(cached) = self.cache.get(&key).await.map_err(log_backend_error)? {
            debug!("flag {} cache hit: {}", name, cached);
            return Ok(cached);
        }

        let enabled = self
            .store
            .get(name)
            .await
            .map_err(log_backend_error)?
            .map(|feature| feature.enabled)
            .unwrap_or(false);

        self.cache
            .set(&key, enabled, self.ttl_seconds)
            .await
            .map_err(log_backend_error)?;
        debug!("flag {} cache miss, store says {}", name, enabled);

        Ok(enabled)
    }

    // == Get All Features ==
    /// Name to enabled state for every stored flag, read straight from the
    /// store.
    pub async fn get_all_features(&self) -> Result<BTreeMap<String, bool>> {
        let features = self.store.list().await.map_err(log_backend_error)?;
        Ok(features
            .into_iter()
            .map(|feature| (feature.name, feature.enabled))
            .collect())
    }

    // == Invalidate Cache ==
    /// Drops the cached value for `name` so the next read goes to the store.
    pub async fn invalidate_cache(&self, name: &str) -> Result<()> {
        self.cache
            .delete(&cache_key(name))
            .await
            .map_err(log_backend_error)
    }

    // == Administration ==
    /// Full records, ordered by name.
    pub async fn list_features(&self) -> Result<Vec<Feature>> {
        self.store.list().await
    }

    /// Creates a flag and clears any cached default for its name.
    pub async fn create_feature(&self, new: NewFeature) -> Result<Feature> {
        if let Some(reason) = NewFeature::name_error(&new.name) {
            return Err(FlagError::InvalidRequest(reason));
        }

        let feature = self.store.insert(new).await?;
        self.invalidate_cache(&feature.name).await?;
        info!("created feature {}", feature);
        Ok(feature)
    }

    /// Turns a flag on or off. The change is visible to the next read.
    pub async fn set_enabled(&self, name: &str, enabled: bool) -> Result<Feature> {
        let feature = self
            .store
            .set_enabled(name, enabled)
            .await?
            .ok_or_else(|| FlagError::NotFound(name.to_string()))?;
        self.invalidate_cache(name).await?;
        info!("updated feature {}", feature);
        Ok(feature)
    }

    /// Removes a flag; subsequent reads fall back to disabled.
    pub async fn delete_feature(&self, name: &str) -> Result<()> {
        if !self.store.delete(name).await? {
            return Err(FlagError::NotFound(name.to_string()));
        }
        self.invalidate_cache(name).await?;
        info!("deleted feature {}", name);
        Ok(())
    }

    /// Creates each missing `(name, enabled)` pair. Existing flags keep their
    /// stored state. Returns how many were created.
    pub async fn seed<I>(&self, defaults: I) -> Result<usize>
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        let mut created = 0;
        for (name, enabled) in defaults {
            if self.store.get(&name).await?.is_some() {
                continue;
            }
            match self.create_feature(NewFeature::new(name, enabled)).await {
                Ok(_) => created += 1,
                // Lost a race with another writer; the flag exists either way.
                Err(FlagError::Conflict(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(created)
    }
}

impl std::fmt::Debug for FeatureService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

fn log_backend_error(err: FlagError) -> FlagError {
    warn!("flag backend error: {}", err);
    err
}
