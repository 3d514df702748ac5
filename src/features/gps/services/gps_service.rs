use chrono::Utc;
use mongodb::bson::to_document;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::core::error::Result;
use crate::features::gps::dtos::CreateGpsDto;
use crate::features::gps::models::GpsRecord;
use crate::modules::storage::{decode_documents, Collection, RecordFilter, RecordStore};
use crate::shared::types::CreatedDto;

/// Service for GPS ingestion and read-back
pub struct GpsService {
    records: Arc<dyn RecordStore>,
}

impl GpsService {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    pub async fn create(&self, dto: CreateGpsDto) -> Result<CreatedDto> {
        dto.validate()?;

        let record = GpsRecord {
            id: None,
            latitude: dto.latitude,
            longitude: dto.longitude,
            timestamp: dto.timestamp.unwrap_or_else(Utc::now),
        };

        let id = self
            .records
            .insert(Collection::GpsCoordinates, to_document(&record)?)
            .await?;

        info!(
            "GPS coordinate saved: id={}, lat={}, lon={}",
            id, record.latitude, record.longitude
        );

        Ok(CreatedDto { id: id.to_hex() })
    }

    pub async fn list(&self, limit: Option<i64>) -> Result<Vec<GpsRecord>> {
        let documents = self
            .records
            .find(Collection::GpsCoordinates, RecordFilter::All, limit)
            .await?;
        decode_documents(documents)
    }

    pub async fn count(&self) -> Result<u64> {
        self.records.count(Collection::GpsCoordinates).await
    }
}
