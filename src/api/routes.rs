//! API Routes
//!
//! Configures the Axum router with the flag service endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    admin_list_handler, create_feature_handler, delete_feature_handler, flag_handler,
    health_handler, invalidate_handler, list_flags_handler, not_found_handler, stats_handler,
    toggle_feature_handler, AppState,
};
use crate::flags::{require_feature, FeatureGate};

/// Flag that opens the administrative API.
pub const ADMIN_FLAG: &str = "enable_admin";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Flag cache statistics
/// - `GET /features` - Snapshot of every flag
/// - `GET /features/:name` - Evaluate one flag
/// - `GET|POST /admin/features` - List or create flags
/// - `PUT|DELETE /admin/features/:name` - Toggle or delete a flag
/// - `POST /admin/features/:name/invalidate` - Drop a cached flag value
///
/// The `/admin` routes answer 404 unless the `enable_admin` flag is on, with
/// the same body as any path that matches no route.
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route(
            "/admin/features",
            get(admin_list_handler).post(create_feature_handler),
        )
        .route(
            "/admin/features/:name",
            put(toggle_feature_handler).delete(delete_feature_handler),
        )
        .route("/admin/features/:name/invalidate", post(invalidate_handler));
    let admin = require_feature(admin, FeatureGate::new(state.flags.clone(), ADMIN_FLAG));

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/features", get(list_flags_handler))
        .route("/features/:name", get(flag_handler))
        .merge(admin)
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
