use std::sync::Arc;
use tracing::{error, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::maintenance::dtos::{BlobPurgeReport, ClearAllResult, CollectionPurgeReport};
use crate::modules::storage::{BlobStore, Collection, RecordStore};

/// Deletes every record and blob.
///
/// Records go first, and blobs are only purged once the vlog records are
/// gone, so no surviving record can point at a deleted blob. The collection
/// steps are independent: one failing does not stop the others, and nothing
/// is rolled back.
pub struct ResetService {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ResetService {
    pub fn new(records: Arc<dyn RecordStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { records, blobs }
    }

    pub async fn clear_all(&self, confirm: bool) -> Result<ClearAllResult> {
        if !confirm {
            return Err(AppError::BadRequest(
                "Refusing to delete data: add ?confirm=true to confirm".to_string(),
            ));
        }

        warn!("Clearing all collected data");

        let sentiments = self.purge_collection(Collection::Sentiments).await;
        let gps_coordinates = self.purge_collection(Collection::GpsCoordinates).await;
        let vlogs = self.purge_collection(Collection::Vlogs).await;

        let blobs = if vlogs.error.is_some() {
            warn!("Skipping blob purge: vlog records were not deleted");
            BlobPurgeReport {
                error: Some("skipped: vlog records were not deleted".to_string()),
                ..Default::default()
            }
        } else {
            match self.blobs.delete_all().await {
                Ok(purge) => BlobPurgeReport {
                    deleted: purge.deleted,
                    failed: purge.failed,
                    error: None,
                },
                Err(e) => {
                    error!("Failed to clear vlog blobs: {}", e);
                    BlobPurgeReport {
                        error: Some(e.to_string()),
                        ..Default::default()
                    }
                }
            }
        };

        let success = [&sentiments, &gps_coordinates, &vlogs]
            .iter()
            .all(|report| report.error.is_none())
            && blobs.error.is_none()
            && blobs.failed == 0;

        info!(
            "Data cleared: sentiments={}, gps={}, vlogs={}, blobs={}, blob_failures={}, success={}",
            sentiments.deleted,
            gps_coordinates.deleted,
            vlogs.deleted,
            blobs.deleted,
            blobs.failed,
            success
        );

        Ok(ClearAllResult {
            success,
            sentiments,
            gps_coordinates,
            vlogs,
            blobs,
        })
    }

    async fn purge_collection(&self, collection: Collection) -> CollectionPurgeReport {
        match self.records.delete_all(collection).await {
            Ok(deleted) => CollectionPurgeReport {
                deleted,
                error: None,
            },
            Err(e) => {
                error!("Failed to clear {}: {}", collection.name(), e);
                CollectionPurgeReport {
                    deleted: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::TestStores;
    use axum::body::Bytes;
    use mongodb::bson::doc;

    async fn seed(stores: &TestStores) {
        let records = stores.record_store();
        records
            .insert(Collection::Sentiments, doc! { "emotion": "happy" })
            .await
            .unwrap();
        records
            .insert(Collection::GpsCoordinates, doc! { "latitude": 1.0 })
            .await
            .unwrap();
        records
            .insert(Collection::GpsCoordinates, doc! { "latitude": 2.0 })
            .await
            .unwrap();
        let blob = stores
            .blob_store()
            .put("clip.mp4", Bytes::from_static(b"x"))
            .await
            .unwrap();
        records
            .insert(Collection::Vlogs, doc! { "blob_ref": blob })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_without_confirm_nothing_is_deleted() {
        let stores = TestStores::new();
        seed(&stores).await;
        let service = ResetService::new(stores.record_store(), stores.blob_store());

        let err = service.clear_all(false).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("confirm=true")));
        assert_eq!(stores.records.documents(Collection::GpsCoordinates).len(), 2);
        assert_eq!(stores.blobs.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_all_empties_everything() {
        let stores = TestStores::new();
        seed(&stores).await;
        let service = ResetService::new(stores.record_store(), stores.blob_store());

        let result = service.clear_all(true).await.unwrap();

        assert!(result.success);
        assert_eq!(result.sentiments.deleted, 1);
        assert_eq!(result.gps_coordinates.deleted, 2);
        assert_eq!(result.vlogs.deleted, 1);
        assert_eq!(result.blobs.deleted, 1);
        for collection in Collection::ALL {
            assert_eq!(stores.record_store().count(collection).await.unwrap(), 0);
        }
        assert_eq!(stores.blobs.len(), 0);

        let again = service.clear_all(true).await.unwrap();
        assert!(again.success);
        assert_eq!(again.gps_coordinates.deleted, 0);
    }

    #[tokio::test]
    async fn test_failing_step_does_not_stop_others() {
        let stores = TestStores::new();
        seed(&stores).await;
        stores.records.fail_deletes_for(Collection::GpsCoordinates);
        let service = ResetService::new(stores.record_store(), stores.blob_store());

        let result = service.clear_all(true).await.unwrap();

        assert!(!result.success);
        assert!(result.gps_coordinates.error.is_some());
        assert_eq!(result.sentiments.deleted, 1);
        assert_eq!(result.vlogs.deleted, 1);
        assert_eq!(result.blobs.deleted, 1);
        assert_eq!(stores.records.documents(Collection::GpsCoordinates).len(), 2);
    }

    #[tokio::test]
    async fn test_failed_vlog_delete_keeps_blobs() {
        let stores = TestStores::new();
        seed(&stores).await;
        stores.records.fail_deletes_for(Collection::Vlogs);
        let service = ResetService::new(stores.record_store(), stores.blob_store());

        let result = service.clear_all(true).await.unwrap();

        assert!(!result.success);
        assert!(result.vlogs.error.is_some());
        assert_eq!(result.sentiments.deleted, 1);
        assert_eq!(result.gps_coordinates.deleted, 2);
        assert_eq!(result.blobs.deleted, 0);
        assert!(result.blobs.error.as_deref().unwrap().starts_with("skipped"));
        assert_eq!(stores.blobs.len(), 1);
        assert_eq!(stores.records.documents(Collection::Vlogs).len(), 1);
    }

    #[tokio::test]
    async fn test_blob_failures_are_reported() {
        let stores = TestStores::new();
        seed(&stores).await;
        let stuck = stores.blobs.ids()[0];
        stores.blobs.fail_delete_of(stuck);
        let service = ResetService::new(stores.record_store(), stores.blob_store());

        let result = service.clear_all(true).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.blobs.failed, 1);
        assert_eq!(result.blobs.deleted, 0);
    }
}
