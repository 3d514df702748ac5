use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::features::sentiments::dtos::SentimentResponseDto;
use crate::shared::time::display_time;

/// Stored document in the `sentiments` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub emotion: String,
    pub score: i32,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl SentimentRecord {
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

impl From<SentimentRecord> for SentimentResponseDto {
    fn from(record: SentimentRecord) -> Self {
        Self {
            id: record.id_hex(),
            timestamp: display_time(record.timestamp),
            emotion: record.emotion,
            score: record.score,
            note: record.note,
        }
    }
}
