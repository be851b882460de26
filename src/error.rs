//! Error types for the flag service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Flag Error Enum ==
/// Unified error type for the flag service and its HTTP surface.
#[derive(Error, Debug)]
pub enum FlagError {
    /// A route guard found its flag disabled
    #[error("Feature not available")]
    FeatureUnavailable(String),

    /// No feature record with this name (admin operations only)
    #[error("Feature not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A feature with this name already exists
    #[error("Feature already exists: {0}")]
    Conflict(String),

    /// The cache or the store could not be reached
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for FlagError {
    fn from(err: rusqlite::Error) -> Self {
        FlagError::BackendUnavailable(err.to_string())
    }
}

impl From<tokio::task::JoinError> for FlagError {
    fn from(err: tokio::task::JoinError) -> Self {
        FlagError::BackendUnavailable(format!("store task failed: {}", err))
    }
}

// == Not Found Response ==
/// The 404 served for unknown paths and for routes behind a disabled flag.
///
/// Both must be byte-identical so a disabled route cannot be told apart from
/// one that does not exist.
pub fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found"
        })),
    )
        .into_response()
}

// == IntoResponse Implementation ==
impl IntoResponse for FlagError {
    fn into_response(self) -> Response {
        let status = match &self {
            FlagError::FeatureUnavailable(_) => return not_found_response(),
            FlagError::NotFound(_) => StatusCode::NOT_FOUND,
            FlagError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            FlagError::Conflict(_) => StatusCode::CONFLICT,
            FlagError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            FlagError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the flag service.
pub type Result<T> = std::result::Result<T, FlagError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn parts(response: Response) -> (StatusCode, Vec<u8>) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_feature_unavailable_hides_flag_name() {
        let err = FlagError::FeatureUnavailable("enable_signup".to_string());
        assert_eq!(err.to_string(), "Feature not available");

        let (status, body) = parts(err.into_response()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(!String::from_utf8(body).unwrap().contains("enable_signup"));
    }

    #[tokio::test]
    async fn test_feature_unavailable_renders_as_plain_not_found() {
        let gated = parts(FlagError::FeatureUnavailable("beta_api".into()).into_response()).await;
        let missing = parts(not_found_response()).await;

        assert_eq!(gated, missing);
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (FlagError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (FlagError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (FlagError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                FlagError::BackendUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                FlagError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_sqlite_error_is_backend_unavailable() {
        let err: FlagError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, FlagError::BackendUnavailable(_)));
    }
}
