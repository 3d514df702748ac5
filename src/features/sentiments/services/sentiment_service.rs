use chrono::Utc;
use mongodb::bson::to_document;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::core::error::Result;
use crate::features::sentiments::dtos::CreateSentimentDto;
use crate::features::sentiments::models::SentimentRecord;
use crate::modules::storage::{decode_documents, Collection, RecordFilter, RecordStore};
use crate::shared::types::CreatedDto;

/// Service for sentiment ingestion and read-back
pub struct SentimentService {
    records: Arc<dyn RecordStore>,
}

impl SentimentService {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    /// Validate and store one sentiment. Nothing is written when validation fails.
    pub async fn create(&self, dto: CreateSentimentDto) -> Result<CreatedDto> {
        dto.validate()?;

        let record = SentimentRecord {
            id: None,
            emotion: dto.emotion.trim().to_string(),
            score: dto.score,
            note: dto.note,
            timestamp: dto.timestamp.unwrap_or_else(Utc::now),
        };

        let id = self
            .records
            .insert(Collection::Sentiments, to_document(&record)?)
            .await?;

        info!(
            "Sentiment saved: id={}, emotion={}, score={}",
            id, record.emotion, record.score
        );

        Ok(CreatedDto { id: id.to_hex() })
    }

    /// All sentiments in store order, optionally capped
    pub async fn list(&self, limit: Option<i64>) -> Result<Vec<SentimentRecord>> {
        let documents = self
            .records
            .find(Collection::Sentiments, RecordFilter::All, limit)
            .await?;
        decode_documents(documents)
    }

    pub async fn count(&self) -> Result<u64> {
        self.records.count(Collection::Sentiments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::TestStores;
    use crate::shared::time::display_time;
    use chrono::TimeZone;

    fn dto(emotion: &str, score: i32) -> CreateSentimentDto {
        CreateSentimentDto {
            emotion: emotion.to_string(),
            score,
            note: Some("測試".to_string()),
            timestamp: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_round_trips_fields() {
        let stores = TestStores::new();
        let service = SentimentService::new(stores.record_store());

        let created = service.create(dto("happy", 4)).await.unwrap();
        let records = service.list(None).await.unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id_hex(), created.id);
        assert_eq!(record.emotion, "happy");
        assert_eq!(record.score, 4);
        assert_eq!(record.note.as_deref(), Some("測試"));
        assert_eq!(display_time(record.timestamp), "2024-01-01 08:00:00");
    }

    #[tokio::test]
    async fn test_invalid_score_creates_nothing() {
        let stores = TestStores::new();
        let service = SentimentService::new(stores.record_store());

        for score in [0, 6] {
            let err = service.create(dto("happy", score)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("score")));
        }
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_timestamp_uses_server_time() {
        let stores = TestStores::new();
        let service = SentimentService::new(stores.record_store());
        let before = Utc::now();

        let mut request = dto("calm", 3);
        request.timestamp = None;
        service.create(request).await.unwrap();

        let records = service.list(None).await.unwrap();
        // BSON datetimes keep millisecond precision
        assert!(records[0].timestamp >= before - chrono::Duration::milliseconds(1));
        assert!(records[0].timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_limit() {
        let stores = TestStores::new();
        let service = SentimentService::new(stores.record_store());

        for emotion in ["a", "b", "c"] {
            service.create(dto(emotion, 3)).await.unwrap();
        }

        let all: Vec<String> = service
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.emotion)
            .collect();
        assert_eq!(all, vec!["a", "b", "c"]);
        assert_eq!(service.list(Some(2)).await.unwrap().len(), 2);
    }
}
