use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::features::gps::dtos::GpsResponseDto;
use crate::shared::time::display_time;

/// Stored document in the `gps_coordinates` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl From<GpsRecord> for GpsResponseDto {
    fn from(record: GpsRecord) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            latitude: record.latitude,
            longitude: record.longitude,
            timestamp: display_time(record.timestamp),
        }
    }
}
