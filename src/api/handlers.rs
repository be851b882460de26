//! API Handlers
//!
//! HTTP request handlers for the flag service endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::cache::MemoryFlagCache;
use crate::config::Config;
use crate::error::{not_found_response, FlagError, Result};
use crate::flags::FeatureService;
use crate::models::{
    CreateFeatureRequest, Feature, FeatureResponse, FeaturesResponse, FlagResponse,
    HealthResponse, MessageResponse, StatsResponse, ToggleFeatureRequest,
};
use crate::store::{FeatureStore, MemoryFeatureStore, SqliteFeatureStore};

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Flag evaluation over the shared cache and store
    pub flags: FeatureService,
    /// Concrete cache handle, kept for stats and the cleanup task
    pub cache: MemoryFlagCache,
}

impl AppState {
    /// Creates a new AppState over an existing cache and store.
    pub fn new(cache: MemoryFlagCache, store: Arc<dyn FeatureStore>, ttl_seconds: u64) -> Self {
        let flags = FeatureService::with_ttl(Arc::new(cache.clone()), store, ttl_seconds);
        Self { flags, cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the SQLite store when `database_path` is set, otherwise keeps
    /// flags in memory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = MemoryFlagCache::new(config.cache_max_entries);
        let store: Arc<dyn FeatureStore> = match &config.database_path {
            Some(path) => Arc::new(SqliteFeatureStore::open(path)?),
            None => Arc::new(MemoryFeatureStore::new()),
        };
        Ok(Self::new(cache, store, config.flag_cache_ttl))
    }
}

/// Handler for GET /features
///
/// Every stored flag with its state, read directly from the store.
pub async fn list_flags_handler(
    State(state): State<AppState>,
) -> Result<Json<FeaturesResponse>> {
    let features = state.flags.get_all_features().await?;
    Ok(Json(FeaturesResponse { features }))
}

/// Handler for GET /features/:name
///
/// Unknown names report `enabled: false`.
pub async fn flag_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FlagResponse>> {
    let enabled = state.flags.is_enabled(&name).await?;
    Ok(Json(FlagResponse::new(name, enabled)))
}

/// Handler for GET /admin/features
pub async fn admin_list_handler(State(state): State<AppState>) -> Result<Json<Vec<Feature>>> {
    Ok(Json(state.flags.list_features().await?))
}

/// Handler for POST /admin/features
pub async fn create_feature_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateFeatureRequest>,
) -> Result<(StatusCode, Json<FeatureResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(FlagError::InvalidRequest(error_msg));
    }

    let feature = state.flags.create_feature(req.into()).await?;
    Ok((StatusCode::CREATED, Json(FeatureResponse::created(feature))))
}

/// Handler for PUT /admin/features/:name
pub async fn toggle_feature_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<ToggleFeatureRequest>,
) -> Result<Json<FeatureResponse>> {
    let feature = state.flags.set_enabled(&name, req.enabled).await?;
    Ok(Json(FeatureResponse::toggled(feature)))
}

/// Handler for DELETE /admin/features/:name
pub async fn delete_feature_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.flags.delete_feature(&name).await?;
    Ok(Json(MessageResponse::deleted(name)))
}

/// Handler for POST /admin/features/:name/invalidate
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.flags.invalidate_cache(&name).await?;
    Ok(Json(MessageResponse::invalidated(name)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for paths that match no route.
///
/// Answers exactly like a route behind a disabled flag.
pub async fn not_found_handler() -> Response {
    not_found_response()
}
