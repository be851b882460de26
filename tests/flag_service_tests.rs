//! Integration Tests for the Feature Service
//!
//! Exercises read-through caching, default-deny, bounded staleness and
//! invalidation against real cache and store implementations.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use journal_flags::cache::{FlagCache, MemoryFlagCache};
use journal_flags::flags::cache_key;
use journal_flags::models::{Feature, NewFeature};
use journal_flags::store::{FeatureStore, MemoryFeatureStore, SqliteFeatureStore};
use journal_flags::{FeatureService, FlagError, Result};
use proptest::prelude::*;

// == Helper Types ==

/// Wraps a store and counts point lookups.
struct CountingStore {
    inner: MemoryFeatureStore,
    gets: AtomicUsize,
}

impl CountingStore {
    fn new(inner: MemoryFeatureStore) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
        }
    }

    fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeatureStore for CountingStore {
    async fn get(&self, name: &str) -> Result<Option<Feature>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(name).await
    }
    async fn list(&self) -> Result<Vec<Feature>> {
        self.inner.list().await
    }
    async fn insert(&self, new: NewFeature) -> Result<Feature> {
        self.inner.insert(new).await
    }
    async fn set_enabled(&self, name: &str, enabled: bool) -> Result<Option<Feature>> {
        self.inner.set_enabled(name, enabled).await
    }
    async fn delete(&self, name: &str) -> Result<bool> {
        self.inner.delete(name).await
    }
}

/// A cache whose backend is down.
struct DownCache;

#[async_trait]
impl FlagCache for DownCache {
    async fn get(&self, _key: &str) -> Result<Option<bool>> {
        Err(FlagError::BackendUnavailable("cache unreachable".into()))
    }
    async fn set(&self, _key: &str, _value: bool, _ttl_seconds: u64) -> Result<()> {
        Err(FlagError::BackendUnavailable("cache unreachable".into()))
    }
    async fn delete(&self, _key: &str) -> Result<()> {
        Err(FlagError::BackendUnavailable("cache unreachable".into()))
    }
}

fn service_over(
    store: MemoryFeatureStore,
    ttl_seconds: u64,
) -> (FeatureService, MemoryFlagCache) {
    let cache = MemoryFlagCache::new(100);
    let service = FeatureService::with_ttl(Arc::new(cache.clone()), Arc::new(store), ttl_seconds);
    (service, cache)
}

// == Default Deny ==

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_unknown_names_are_disabled(name in ".{0,40}") {
        let (service, _) = service_over(MemoryFeatureStore::new(), 300);

        let enabled = tokio_test::block_on(service.is_enabled(&name)).unwrap();

        prop_assert!(!enabled);
    }
}

// == Read-Through ==

#[tokio::test]
async fn test_enabled_record_with_empty_cache_fills_cache() {
    let store = MemoryFeatureStore::with_features([("dark_mode", true)]);
    let (service, cache) = service_over(store, 300);

    assert!(service.is_enabled("dark_mode").await.unwrap());
    assert_eq!(cache.get(&cache_key("dark_mode")).await.unwrap(), Some(true));
}

#[tokio::test]
async fn test_cache_hit_skips_store() {
    let store = Arc::new(CountingStore::new(MemoryFeatureStore::with_features([
        ("dark_mode", true),
    ])));
    let service = FeatureService::new(Arc::new(MemoryFlagCache::new(100)), store.clone());

    for _ in 0..5 {
        assert!(service.is_enabled("dark_mode").await.unwrap());
    }
    assert_eq!(store.gets(), 1);

    // A cached false is a hit too.
    for _ in 0..5 {
        assert!(!service.is_enabled("missing").await.unwrap());
    }
    assert_eq!(store.gets(), 2);
}

// == Bounded Staleness ==

#[tokio::test]
async fn test_store_change_hidden_until_invalidated() {
    let store = MemoryFeatureStore::with_features([("beta_api", true)]);
    let (service, _) = service_over(store.clone(), 300);

    assert!(service.is_enabled("beta_api").await.unwrap());

    // Mutate behind the service's back.
    store.set_enabled("beta_api", false).await.unwrap();
    assert!(service.is_enabled("beta_api").await.unwrap());

    service.invalidate_cache("beta_api").await.unwrap();
    assert!(!service.is_enabled("beta_api").await.unwrap());
}

#[tokio::test]
async fn test_store_change_visible_after_ttl() {
    let store = MemoryFeatureStore::with_features([("beta_api", true)]);
    let (service, _) = service_over(store.clone(), 1);

    assert!(service.is_enabled("beta_api").await.unwrap());
    store.set_enabled("beta_api", false).await.unwrap();
    assert!(service.is_enabled("beta_api").await.unwrap());

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert!(!service.is_enabled("beta_api").await.unwrap());
}

#[tokio::test]
async fn test_invalidate_absent_entry_is_noop() {
    let (service, cache) = service_over(MemoryFeatureStore::new(), 300);

    service.invalidate_cache("never_read").await.unwrap();

    assert_eq!(cache.stats().await.total_entries, 0);
}

// == Bulk Snapshot ==

#[tokio::test]
async fn test_get_all_features_ignores_cache() {
    let store = MemoryFeatureStore::with_features([("dark_mode", true), ("beta_api", false)]);
    let (service, cache) = service_over(store, 300);

    // Poison the cache with the opposite values.
    cache.set(&cache_key("dark_mode"), false, 300).await.unwrap();
    cache.set(&cache_key("beta_api"), true, 300).await.unwrap();

    let all = service.get_all_features().await.unwrap();

    let expected: BTreeMap<String, bool> = [
        ("dark_mode".to_string(), true),
        ("beta_api".to_string(), false),
    ]
    .into_iter()
    .collect();
    assert_eq!(all, expected);
}

#[tokio::test]
async fn test_get_all_features_empty_store() {
    let (service, _) = service_over(MemoryFeatureStore::new(), 300);
    assert!(service.get_all_features().await.unwrap().is_empty());
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_converge() {
    let store = MemoryFeatureStore::with_features([("enable_signup", true)]);
    let (service, cache) = service_over(store, 300);

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.is_enabled("enable_signup").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }
    assert_eq!(
        cache.get(&cache_key("enable_signup")).await.unwrap(),
        Some(true)
    );
    assert_eq!(cache.stats().await.total_entries, 1);
}

// == Backend Failures ==

#[tokio::test]
async fn test_cache_failure_is_not_masked() {
    let store = MemoryFeatureStore::with_features([("dark_mode", true)]);
    let service = FeatureService::new(Arc::new(DownCache), Arc::new(store));

    assert!(matches!(
        service.is_enabled("dark_mode").await,
        Err(FlagError::BackendUnavailable(_))
    ));
    assert!(matches!(
        service.invalidate_cache("dark_mode").await,
        Err(FlagError::BackendUnavailable(_))
    ));
    // The bulk snapshot never touches the cache.
    assert_eq!(service.get_all_features().await.unwrap().len(), 1);
}

// == SQLite Backed ==

#[tokio::test]
async fn test_service_over_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteFeatureStore::open(dir.path().join("flags.db")).unwrap();
    let cache = MemoryFlagCache::new(100);
    let service = FeatureService::new(Arc::new(cache), Arc::new(store));

    assert!(!service.is_enabled("enable_signin").await.unwrap());

    service
        .create_feature(NewFeature::new("enable_signin", false))
        .await
        .unwrap();
    service.set_enabled("enable_signin", true).await.unwrap();

    assert!(service.is_enabled("enable_signin").await.unwrap());
    assert_eq!(
        service.get_all_features().await.unwrap().get("enable_signin"),
        Some(&true)
    );
}
