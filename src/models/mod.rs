//! Feature records and the request/response models of the flag API.

pub mod feature;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use feature::{Feature, NewFeature, MAX_NAME_LENGTH};
pub use requests::{CreateFeatureRequest, ToggleFeatureRequest};
pub use responses::{
    FeatureResponse, FeaturesResponse, FlagResponse, HealthResponse, MessageResponse,
    StatsResponse,
};
