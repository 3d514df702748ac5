use chrono::Utc;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::export::dtos::{DashboardCounts, ExportDocument, TotalRecords};
use crate::features::export::services::{ArchiveService, VlogArchive, VlogSelection};
use crate::features::gps::models::GpsRecord;
use crate::features::gps::GpsService;
use crate::features::sentiments::models::SentimentRecord;
use crate::features::sentiments::SentimentService;
use crate::features::vlogs::models::VlogRecord;
use crate::features::vlogs::VlogService;
use crate::shared::constants::{DISPLAY_TIMEZONE_LABEL, PREVIEW_LIMIT};
use crate::shared::time::display_time;

/// Read side of the backend: aggregates the ingestion services for exports
pub struct ExportService {
    sentiments: Arc<SentimentService>,
    gps: Arc<GpsService>,
    vlogs: Arc<VlogService>,
    archives: ArchiveService,
}

impl ExportService {
    pub fn new(
        sentiments: Arc<SentimentService>,
        gps: Arc<GpsService>,
        vlogs: Arc<VlogService>,
    ) -> Self {
        Self {
            archives: ArchiveService::new(vlogs.clone()),
            sentiments,
            gps,
            vlogs,
        }
    }

    pub async fn counts(&self) -> Result<DashboardCounts> {
        let (sentiments, gps_coordinates, vlogs) = tokio::try_join!(
            self.sentiments.count(),
            self.gps.count(),
            self.vlogs.count()
        )?;

        Ok(DashboardCounts {
            sentiments,
            gps_coordinates,
            vlogs,
        })
    }

    pub async fn sentiments(&self) -> Result<Vec<SentimentRecord>> {
        self.sentiments.list(None).await
    }

    /// First rows for the HTML preview plus the overall total
    pub async fn sentiments_preview(&self) -> Result<(Vec<SentimentRecord>, u64)> {
        tokio::try_join!(
            self.sentiments.list(Some(PREVIEW_LIMIT)),
            self.sentiments.count()
        )
    }

    pub async fn gps(&self) -> Result<Vec<GpsRecord>> {
        self.gps.list(None).await
    }

    pub async fn gps_preview(&self) -> Result<(Vec<GpsRecord>, u64)> {
        tokio::try_join!(self.gps.list(Some(PREVIEW_LIMIT)), self.gps.count())
    }

    pub async fn vlogs(&self) -> Result<Vec<VlogRecord>> {
        self.vlogs.list().await
    }

    pub async fn package_vlogs(&self, selection: VlogSelection) -> Result<VlogArchive> {
        self.archives.package_vlogs(selection).await
    }

    /// Every collection in one document, timestamps in display time
    pub async fn full_export(&self) -> Result<ExportDocument> {
        let (sentiments, gps, vlogs) = tokio::try_join!(
            self.sentiments.list(None),
            self.gps.list(None),
            self.vlogs.list()
        )?;

        let total_records = TotalRecords {
            sentiments: sentiments.len(),
            gps: gps.len(),
            vlogs: vlogs.len(),
        };

        Ok(ExportDocument {
            sentiments: sentiments.into_iter().map(Into::into).collect(),
            gps_coordinates: gps.into_iter().map(Into::into).collect(),
            vlogs: vlogs.into_iter().map(Into::into).collect(),
            export_time: display_time(Utc::now()),
            timezone: DISPLAY_TIMEZONE_LABEL.to_string(),
            note: format!("All timestamps are converted to {}", DISPLAY_TIMEZONE_LABEL),
            total_records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::gps::dtos::CreateGpsDto;
    use crate::features::sentiments::dtos::CreateSentimentDto;
    use crate::shared::test_helpers::TestStores;
    use chrono::TimeZone;

    fn service(stores: &TestStores) -> ExportService {
        ExportService::new(
            Arc::new(SentimentService::new(stores.record_store())),
            Arc::new(GpsService::new(stores.record_store())),
            Arc::new(VlogService::new(
                stores.record_store(),
                stores.blob_store(),
                1024,
            )),
        )
    }

    #[tokio::test]
    async fn test_full_export_normalizes_timestamps() {
        let stores = TestStores::new();
        let export = service(&stores);
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        export
            .sentiments
            .create(CreateSentimentDto {
                emotion: "happy".to_string(),
                score: 4,
                note: None,
                timestamp: Some(at),
            })
            .await
            .unwrap();
        export
            .gps
            .create(CreateGpsDto {
                latitude: 25.0,
                longitude: 121.5,
                timestamp: Some(at),
            })
            .await
            .unwrap();

        let document = export.full_export().await.unwrap();

        assert_eq!(document.total_records.sentiments, 1);
        assert_eq!(document.total_records.gps, 1);
        assert_eq!(document.total_records.vlogs, 0);
        assert_eq!(document.sentiments[0].timestamp, "2024-01-01 08:00:00");
        assert_eq!(document.gps_coordinates[0].timestamp, "2024-01-01 08:00:00");
        assert_eq!(document.timezone, "Asia/Taipei (UTC+8)");
    }

    #[tokio::test]
    async fn test_preview_is_capped_but_total_is_not() {
        let stores = TestStores::new();
        let export = service(&stores);

        for _ in 0..(PREVIEW_LIMIT + 5) {
            export
                .gps
                .create(CreateGpsDto {
                    latitude: 1.0,
                    longitude: 2.0,
                    timestamp: None,
                })
                .await
                .unwrap();
        }

        let (rows, total) = export.gps_preview().await.unwrap();
        assert_eq!(rows.len() as i64, PREVIEW_LIMIT);
        assert_eq!(total as i64, PREVIEW_LIMIT + 5);
        assert_eq!(export.counts().await.unwrap().gps_coordinates as i64, PREVIEW_LIMIT + 5);
    }
}
