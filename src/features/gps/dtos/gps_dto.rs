use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::time::deserialize_optional_timestamp;

/// Request DTO for submitting a GPS fix
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateGpsDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[schema(example = 25.0330)]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    #[schema(example = 121.5654)]
    pub longitude: f64,

    /// When the fix was taken; RFC 3339, or naive UTC. Defaults to now.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    #[schema(value_type = Option<String>, example = "2024-01-01T00:00:00Z")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// GPS fix as rendered for exports, timestamp in display time
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GpsResponseDto {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(example = "2024-01-01 08:00:00")]
    pub timestamp: String,
}
