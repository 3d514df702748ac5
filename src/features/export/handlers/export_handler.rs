use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue},
    response::{Html, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::export::dtos::{
    ExportDocument, GpsPreviewRow, SentimentPreviewRow, VlogIdsQuery, VlogListRow,
};
use crate::features::export::services::{
    export_gps_csv, export_sentiments_csv, ExportService, VlogArchive, VlogSelection,
};
use crate::shared::constants::{
    ARCHIVE_ENTRIES_HEADER, DISPLAY_TIMEZONE_LABEL, SKIPPED_VLOG_IDS_HEADER,
};
use crate::shared::download::attachment;
use crate::shared::pages::render_page;
use crate::shared::time::file_stamp;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Operator dashboard with record counts
#[utoipa::path(
    get,
    path = "/export",
    tag = "export",
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn dashboard(State(service): State<Arc<ExportService>>) -> Result<Html<String>> {
    let counts = service.counts().await?;
    let page = render_page(
        "dashboard.html",
        json!({ "timezone": DISPLAY_TIMEZONE_LABEL, "counts": counts }),
    )?;
    Ok(Html(page))
}

/// Download all sentiments as CSV
#[utoipa::path(
    get,
    path = "/export/sentiments/csv",
    tag = "export",
    responses(
        (status = 200, description = "CSV file with UTF-8 BOM", content_type = "text/csv"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn sentiments_csv(State(service): State<Arc<ExportService>>) -> Result<Response> {
    let records = service.sentiments().await?;
    let body = export_sentiments_csv(&records)?;
    let filename = format!("sentiments_{}.csv", file_stamp(Utc::now()));
    Ok(attachment(CSV_CONTENT_TYPE, &filename, body))
}

/// HTML preview of the first sentiments
#[utoipa::path(
    get,
    path = "/export/sentiments/preview",
    tag = "export",
    responses(
        (status = 200, description = "Preview page", content_type = "text/html"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn sentiments_preview(State(service): State<Arc<ExportService>>) -> Result<Html<String>> {
    let (records, total) = service.sentiments_preview().await?;
    let rows: Vec<SentimentPreviewRow> = records.into_iter().map(Into::into).collect();
    let page = render_page(
        "sentiments_preview.html",
        json!({ "timezone": DISPLAY_TIMEZONE_LABEL, "total": total, "rows": rows }),
    )?;
    Ok(Html(page))
}

/// Download all GPS fixes as CSV
#[utoipa::path(
    get,
    path = "/export/gps/csv",
    tag = "export",
    responses(
        (status = 200, description = "CSV file with UTF-8 BOM", content_type = "text/csv"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn gps_csv(State(service): State<Arc<ExportService>>) -> Result<Response> {
    let records = service.gps().await?;
    let body = export_gps_csv(&records)?;
    let filename = format!("gps_coordinates_{}.csv", file_stamp(Utc::now()));
    Ok(attachment(CSV_CONTENT_TYPE, &filename, body))
}

/// HTML preview of the first GPS fixes
#[utoipa::path(
    get,
    path = "/export/gps/preview",
    tag = "export",
    responses(
        (status = 200, description = "Preview page", content_type = "text/html"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn gps_preview(State(service): State<Arc<ExportService>>) -> Result<Html<String>> {
    let (records, total) = service.gps_preview().await?;
    let rows: Vec<GpsPreviewRow> = records.into_iter().map(Into::into).collect();
    let page = render_page(
        "gps_preview.html",
        json!({ "timezone": DISPLAY_TIMEZONE_LABEL, "total": total, "rows": rows }),
    )?;
    Ok(Html(page))
}

/// HTML list of vlogs with download links
#[utoipa::path(
    get,
    path = "/export/vlogs",
    tag = "export",
    responses(
        (status = 200, description = "Vlog list page", content_type = "text/html"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn vlogs_page(State(service): State<Arc<ExportService>>) -> Result<Html<String>> {
    let vlogs: Vec<VlogListRow> = service.vlogs().await?.into_iter().map(Into::into).collect();
    let page = render_page(
        "vlogs.html",
        json!({ "timezone": DISPLAY_TIMEZONE_LABEL, "vlogs": vlogs }),
    )?;
    Ok(Html(page))
}

fn zip_response(archive: VlogArchive, filename: &str) -> Response {
    let mut response = attachment("application/zip", filename, archive.bytes);
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(&archive.entries.to_string()) {
        headers.insert(HeaderName::from_static(ARCHIVE_ENTRIES_HEADER), value);
    }
    if !archive.skipped_ids.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&archive.skipped_ids.join(",")) {
            headers.insert(HeaderName::from_static(SKIPPED_VLOG_IDS_HEADER), value);
        }
    }

    response
}

/// Download every vlog as one ZIP
#[utoipa::path(
    get,
    path = "/export/vlogs/download-all",
    tag = "export",
    responses(
        (status = 200, description = "ZIP archive; skipped ids in X-Skipped-Vlog-Ids", content_type = "application/zip"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn download_all_vlogs(State(service): State<Arc<ExportService>>) -> Result<Response> {
    let archive = service.package_vlogs(VlogSelection::All).await?;
    let filename = format!("emogo_vlogs_{}.zip", file_stamp(Utc::now()));
    Ok(zip_response(archive, &filename))
}

/// Download the selected vlogs as one ZIP
#[utoipa::path(
    get,
    path = "/export/vlogs/download-multiple",
    tag = "export",
    params(VlogIdsQuery),
    responses(
        (status = 200, description = "ZIP archive; skipped ids in X-Skipped-Vlog-Ids", content_type = "application/zip"),
        (status = 400, description = "No ids given"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn download_selected_vlogs(
    State(service): State<Arc<ExportService>>,
    Query(query): Query<VlogIdsQuery>,
) -> Result<Response> {
    let ids = query.ids();
    if ids.is_empty() {
        return Err(AppError::Validation(
            "ids: at least one vlog id is required".to_string(),
        ));
    }

    let archive = service.package_vlogs(VlogSelection::Ids(ids)).await?;
    let filename = format!("emogo_vlogs_selected_{}.zip", file_stamp(Utc::now()));
    Ok(zip_response(archive, &filename))
}

/// Full JSON export of every collection
#[utoipa::path(
    get,
    path = "/export/all",
    tag = "export",
    responses(
        (status = 200, description = "Full export", body = ExportDocument),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn export_all(State(service): State<Arc<ExportService>>) -> Result<Json<ExportDocument>> {
    Ok(Json(service.full_export().await?))
}

/// Full JSON export as a pretty-printed file
#[utoipa::path(
    get,
    path = "/export/all/download",
    tag = "export",
    responses(
        (status = 200, description = "Full export as attachment", content_type = "application/json"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn export_all_download(State(service): State<Arc<ExportService>>) -> Result<Response> {
    let document = service.full_export().await?;
    let body = serde_json::to_vec_pretty(&document)
        .map_err(|e| AppError::Internal(format!("Failed to encode export: {}", e)))?;
    let filename = format!("emogo_data_{}.json", file_stamp(Utc::now()));
    Ok(attachment("application/json", &filename, body))
}
