//! Request DTOs for the flag API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::models::NewFeature;

/// Request body for POST /admin/features
///
/// # Fields
/// - `name`: Unique flag name
/// - `enabled`: Initial state (default: false)
/// - `description`: Free-form note (default: empty)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeatureRequest {
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateFeatureRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        NewFeature::name_error(&self.name)
    }
}

impl From<CreateFeatureRequest> for NewFeature {
    fn from(req: CreateFeatureRequest) -> Self {
        NewFeature::new(req.name, req.enabled)
            .with_description(req.description.unwrap_or_default())
    }
}

/// Request body for PUT /admin/features/:name
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleFeatureRequest {
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let json = r#"{"name": "dark_mode"}"#;
        let req: CreateFeatureRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "dark_mode");
        assert!(!req.enabled);
        assert!(req.description.is_none());

        let new: NewFeature = req.into();
        assert_eq!(new.description, "");
    }

    #[test]
    fn test_validate_empty_name() {
        let req = CreateFeatureRequest {
            name: " ".to_string(),
            enabled: true,
            description: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_overlong_name() {
        let req = CreateFeatureRequest {
            name: "n".repeat(101),
            enabled: false,
            description: None,
        };
        assert!(req.validate().unwrap().contains("100"));
    }

    #[test]
    fn test_toggle_request_requires_bool() {
        assert!(serde_json::from_str::<ToggleFeatureRequest>(r#"{"enabled": true}"#).is_ok());
        assert!(serde_json::from_str::<ToggleFeatureRequest>(r#"{"enabled": "yes"}"#).is_err());
        assert!(serde_json::from_str::<ToggleFeatureRequest>(r#"{}"#).is_err());
    }
}
