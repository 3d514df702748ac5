use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::gps::dtos::GpsResponseDto;
use crate::features::gps::models::GpsRecord;
use crate::features::sentiments::dtos::SentimentResponseDto;
use crate::features::sentiments::models::SentimentRecord;
use crate::features::vlogs::dtos::VlogResponseDto;
use crate::features::vlogs::models::VlogRecord;
use crate::shared::time::display_time;

/// Full data export, all timestamps in display time
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportDocument {
    pub sentiments: Vec<SentimentResponseDto>,
    pub gps_coordinates: Vec<GpsResponseDto>,
    pub vlogs: Vec<VlogResponseDto>,
    #[schema(example = "2024-01-01 08:00:00")]
    pub export_time: String,
    #[schema(example = "Asia/Taipei (UTC+8)")]
    pub timezone: String,
    pub note: String,
    pub total_records: TotalRecords,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TotalRecords {
    pub sentiments: usize,
    pub gps: usize,
    pub vlogs: usize,
}

/// Record counts shown on the dashboard
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardCounts {
    pub sentiments: u64,
    pub gps_coordinates: u64,
    pub vlogs: u64,
}

/// Selection for `download-multiple`: comma separated vlog ids
#[derive(Debug, Deserialize, IntoParams)]
pub struct VlogIdsQuery {
    /// Comma separated vlog record ids
    #[param(example = "65a1f0c2e4b0a1b2c3d4e5f6,65a1f0c2e4b0a1b2c3d4e5f7")]
    pub ids: Option<String>,
}

impl VlogIdsQuery {
    /// Non-empty ids in request order, duplicates removed
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self
            .ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            if !ids.iter().any(|seen| seen == id) {
                ids.push(id.to_string());
            }
        }
        ids
    }
}

#[derive(Debug, Serialize)]
pub struct SentimentPreviewRow {
    pub emotion: String,
    pub score: i32,
    pub note: Option<String>,
    pub timestamp: String,
}

impl From<SentimentRecord> for SentimentPreviewRow {
    fn from(record: SentimentRecord) -> Self {
        Self {
            timestamp: display_time(record.timestamp),
            emotion: record.emotion,
            score: record.score,
            note: record.note,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GpsPreviewRow {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: String,
}

impl From<GpsRecord> for GpsPreviewRow {
    fn from(record: GpsRecord) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            timestamp: display_time(record.timestamp),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VlogListRow {
    pub id: String,
    pub original_filename: String,
    pub description: Option<String>,
    pub size_mb: String,
    pub upload_time: String,
}

impl From<VlogRecord> for VlogListRow {
    fn from(record: VlogRecord) -> Self {
        Self {
            id: record.id_hex(),
            size_mb: record.size_mb(),
            upload_time: display_time(record.upload_time),
            original_filename: record.original_filename,
            description: record.description,
        }
    }
}
