use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::export::handlers;
use crate::features::export::services::ExportService;

/// Create routes for the export feature
pub fn routes(service: Arc<ExportService>) -> Router {
    Router::new()
        .route("/export", get(handlers::dashboard))
        .route("/export/sentiments/csv", get(handlers::sentiments_csv))
        .route("/export/sentiments/preview", get(handlers::sentiments_preview))
        .route("/export/gps/csv", get(handlers::gps_csv))
        .route("/export/gps/preview", get(handlers::gps_preview))
        .route("/export/vlogs", get(handlers::vlogs_page))
        .route(
            "/export/vlogs/download-all",
            get(handlers::download_all_vlogs),
        )
        .route(
            "/export/vlogs/download-multiple",
            get(handlers::download_selected_vlogs),
        )
        .route("/export/all", get(handlers::export_all))
        .route("/export/all/download", get(handlers::export_all_download))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::gps::GpsService;
    use crate::features::sentiments::dtos::CreateSentimentDto;
    use crate::features::sentiments::SentimentService;
    use crate::features::vlogs::dtos::UploadVlogDto;
    use crate::features::vlogs::VlogService;
    use crate::shared::test_helpers::TestStores;
    use axum::body::Bytes;
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;
    use chrono::{TimeZone, Utc};
    use mongodb::bson::oid::ObjectId;
    use serde_json::Value;

    struct Fixture {
        server: TestServer,
        sentiments: Arc<SentimentService>,
        vlogs: Arc<VlogService>,
    }

    fn fixture(stores: &TestStores) -> Fixture {
        let sentiments = Arc::new(SentimentService::new(stores.record_store()));
        let gps = Arc::new(GpsService::new(stores.record_store()));
        let vlogs = Arc::new(VlogService::new(
            stores.record_store(),
            stores.blob_store(),
            1024,
        ));
        let export = Arc::new(ExportService::new(
            sentiments.clone(),
            gps,
            vlogs.clone(),
        ));

        Fixture {
            server: TestServer::new(routes(export)).unwrap(),
            sentiments,
            vlogs,
        }
    }

    async fn add_sentiment(fixture: &Fixture, emotion: &str, note: Option<&str>) {
        fixture
            .sentiments
            .create(CreateSentimentDto {
                emotion: emotion.to_string(),
                score: 3,
                note: note.map(str::to_string),
                timestamp: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            })
            .await
            .unwrap();
    }

    async fn add_vlog(fixture: &Fixture, name: &str) -> String {
        fixture
            .vlogs
            .upload(UploadVlogDto {
                file: Bytes::from_static(b"payload"),
                original_filename: name.to_string(),
                content_type: Some("video/mp4".to_string()),
                description: Some("<b>trip</b>".to_string()),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_sentiments_csv_download() {
        let stores = TestStores::new();
        let fixture = fixture(&stores);
        add_sentiment(&fixture, "happy", Some("測試")).await;

        let response = fixture.server.get("/export/sentiments/csv").await;
        response.assert_status_ok();
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            "text/csv; charset=utf-8"
        );
        let disposition = response.header(header::CONTENT_DISPOSITION);
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.starts_with("attachment;"));
        assert!(disposition.contains("sentiments_"));

        let body = response.as_bytes();
        assert!(body.starts_with(b"\xEF\xBB\xBF"));
        let text = std::str::from_utf8(&body[3..]).unwrap();
        assert_eq!(
            text,
            "emotion,score,note,timestamp\nhappy,3,測試,2024-01-01 08:00:00\n"
        );
    }

    #[tokio::test]
    async fn test_empty_gps_csv_is_header_only() {
        let stores = TestStores::new();
        let fixture = fixture(&stores);

        let response = fixture.server.get("/export/gps/csv").await;
        response.assert_status_ok();
        assert_eq!(
            response.as_bytes().as_ref(),
            b"\xEF\xBB\xBFlatitude,longitude,timestamp\n"
        );
    }

    #[tokio::test]
    async fn test_dashboard_and_previews_render() {
        let stores = TestStores::new();
        let fixture = fixture(&stores);
        add_sentiment(&fixture, "<script>", None).await;
        add_vlog(&fixture, "trip.mp4").await;

        let dashboard = fixture.server.get("/export").await;
        dashboard.assert_status_ok();
        assert!(dashboard.text().contains("Asia/Taipei (UTC+8)"));

        let preview = fixture.server.get("/export/sentiments/preview").await;
        preview.assert_status_ok();
        let html = preview.text();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("2024-01-01 08:00:00"));

        let vlogs = fixture.server.get("/export/vlogs").await;
        vlogs.assert_status_ok();
        let html = vlogs.text();
        assert!(html.contains("trip.mp4"));
        assert!(html.contains("0.00 MB"));
        assert!(html.contains("&lt;b&gt;trip&lt;/b&gt;"));

        fixture
            .server
            .get("/export/gps/preview")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_download_multiple_reports_skipped_ids() {
        let stores = TestStores::new();
        let fixture = fixture(&stores);
        let kept = add_vlog(&fixture, "kept.mp4").await;
        let missing = ObjectId::new().to_hex();

        let response = fixture
            .server
            .get("/export/vlogs/download-multiple")
            .add_query_param("ids", format!("{},{}", kept, missing))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(header::CONTENT_TYPE), "application/zip");
        assert_eq!(response.header("x-archive-entries"), "1");
        assert_eq!(
            response.header("x-skipped-vlog-ids"),
            missing.as_str()
        );

        let archive =
            zip::ZipArchive::new(std::io::Cursor::new(response.as_bytes().to_vec())).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[tokio::test]
    async fn test_download_multiple_requires_ids() {
        let stores = TestStores::new();
        let fixture = fixture(&stores);

        fixture
            .server
            .get("/export/vlogs/download-multiple")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        fixture
            .server
            .get("/export/vlogs/download-multiple")
            .add_query_param("ids", "")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_all_without_skips_has_no_skip_header() {
        let stores = TestStores::new();
        let fixture = fixture(&stores);
        add_vlog(&fixture, "a.mp4").await;
        add_vlog(&fixture, "a.mp4").await;

        let response = fixture.server.get("/export/vlogs/download-all").await;
        response.assert_status_ok();
        assert_eq!(response.header("x-archive-entries"), "2");
        assert!(response.maybe_header("x-skipped-vlog-ids").is_none());
    }

    #[tokio::test]
    async fn test_export_all_json_and_download() {
        let stores = TestStores::new();
        let fixture = fixture(&stores);
        add_sentiment(&fixture, "happy", None).await;
        add_vlog(&fixture, "clip.mp4").await;

        let body: Value = fixture.server.get("/export/all").await.json();
        assert_eq!(body["total_records"]["sentiments"], 1);
        assert_eq!(body["total_records"]["gps"], 0);
        assert_eq!(body["total_records"]["vlogs"], 1);
        assert_eq!(body["timezone"], "Asia/Taipei (UTC+8)");
        assert_eq!(body["sentiments"][0]["timestamp"], "2024-01-01 08:00:00");
        assert_eq!(body["vlogs"][0]["blob_ref"].as_str().unwrap().len(), 24);

        let download = fixture.server.get("/export/all/download").await;
        download.assert_status_ok();
        assert!(download
            .header(header::CONTENT_DISPOSITION)
            .to_str()
            .unwrap()
            .contains("emogo_data_"));
        let parsed: Value = serde_json::from_slice(download.as_bytes()).unwrap();
        assert_eq!(parsed["total_records"]["vlogs"], 1);
    }

    #[tokio::test]
    async fn test_store_outage_is_server_error() {
        let stores = TestStores::new();
        let fixture = fixture(&stores);
        stores.records.set_unavailable(true);

        fixture
            .server
            .get("/export/all")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
