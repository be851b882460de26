//! Feature flag records as held by the durable store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Longest flag name accepted when creating a feature, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// A named on/off switch.
///
/// Only `name` and `enabled` take part in evaluation; the rest is metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub name: String,
    pub enabled: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feature {
    /// Builds a fresh record stamped with the current time.
    pub fn from_new(new: NewFeature) -> Self {
        let now = Utc::now();
        Self {
            name: new.name,
            enabled: new.enabled,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.enabled { "enabled" } else { "disabled" };
        write!(f, "{} ({})", self.name, state)
    }
}

/// Fields supplied when creating a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFeature {
    pub name: String,
    pub enabled: bool,
    pub description: String,
}

impl NewFeature {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Why `name` cannot be stored, if it cannot.
    ///
    /// Only applies on creation. Lookups accept any name.
    pub fn name_error(name: &str) -> Option<String> {
        if name.trim().is_empty() {
            Some("Feature name is required".to_string())
        } else if name.chars().count() > MAX_NAME_LENGTH {
            Some(format!(
                "Feature name must be at most {} characters",
                MAX_NAME_LENGTH
            ))
        } else {
            None
        }
    }
}
