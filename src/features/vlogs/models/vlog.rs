use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::features::vlogs::dtos::VlogResponseDto;
use crate::shared::time::display_time;

/// Stored document in the `vlogs` collection. The payload itself lives in
/// the blob store under `blob_ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlogRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub blob_ref: ObjectId,
    pub filename: String,
    pub original_filename: String,
    #[serde(default)]
    pub content_type: Option<String>,
    pub size: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub upload_time: DateTime<Utc>,
}

impl VlogRecord {
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    /// Size in MiB, two decimals, for listings
    pub fn size_mb(&self) -> String {
        format!("{:.2}", self.size as f64 / (1024.0 * 1024.0))
    }
}

impl From<VlogRecord> for VlogResponseDto {
    fn from(record: VlogRecord) -> Self {
        Self {
            id: record.id_hex(),
            blob_ref: record.blob_ref.to_hex(),
            upload_time: display_time(record.upload_time),
            filename: record.filename,
            original_filename: record.original_filename,
            content_type: record.content_type,
            size: record.size,
            description: record.description,
        }
    }
}
