//! Route guard: hides routes behind a feature flag.
//!
//! A disabled flag answers 404 rather than 403, so gated routes look
//! nonexistent from the outside.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tracing::debug;

use crate::error::{FlagError, Result};
use crate::flags::FeatureService;

/// A flag name bound to the service that evaluates it.
#[derive(Debug, Clone)]
pub struct FeatureGate {
    service: FeatureService,
    flag: Arc<str>,
}

impl FeatureGate {
    pub fn new(service: FeatureService, flag: impl Into<String>) -> Self {
        let flag: String = flag.into();
        Self {
            service,
            flag: Arc::from(flag),
        }
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// `Ok(())` when the flag is on, [`FlagError::FeatureUnavailable`] when it
    /// is off. Backend failures pass through untouched.
    pub async fn check(&self) -> Result<()> {
        if self.service.is_enabled(&self.flag).await? {
            Ok(())
        } else {
            Err(FlagError::FeatureUnavailable(self.flag.to_string()))
        }
    }
}

/// Middleware for `middleware::from_fn_with_state`.
///
/// Runs the inner handler only when the gate's flag is enabled.
pub async fn feature_required(
    State(gate): State<FeatureGate>,
    request: Request,
    next: Next,
) -> Response {
    match gate.check().await {
        Ok(()) => next.run(request).await,
        Err(err @ FlagError::FeatureUnavailable(_)) => {
            debug!(
                "{} {} blocked by flag {}",
                request.method(),
                request.uri().path(),
                gate.flag()
            );
            err.into_response()
        }
        // Already logged by the service.
        Err(err) => err.into_response(),
    }
}

/// Puts every route already registered on `router` behind `gate`.
///
/// Paths that match no route keep the router's normal fallback.
pub fn require_feature<S>(router: Router<S>, gate: FeatureGate) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(gate, feature_required))
}
