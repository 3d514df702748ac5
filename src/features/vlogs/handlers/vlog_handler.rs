use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::vlogs::dtos::{
    UploadVlogDto, UploadVlogForm, VlogUploadedDto, DEFAULT_CONTENT_TYPE,
};
use crate::features::vlogs::services::VlogService;
use crate::shared::download::attachment;
use crate::shared::types::ApiResponse;

/// Upload a vlog
///
/// Accepts multipart/form-data with:
/// - `file`: the video (required, non-empty)
/// - `description`: optional free text
#[utoipa::path(
    post,
    path = "/vlogs",
    tag = "vlogs",
    request_body(
        content = UploadVlogForm,
        content_type = "multipart/form-data",
        description = "Video file with an optional description",
    ),
    responses(
        (status = 201, description = "Vlog saved", body = ApiResponse<VlogUploadedDto>),
        (status = 400, description = "Missing or empty file"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn upload_vlog(
    State(service): State<Arc<VlogService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<VlogUploadedDto>>)> {
    let mut upload: Option<UploadVlogDto> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("multipart data", e))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field.content_type().map(|s| s.to_string());
                let original_filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "vlog".to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("file data", e))?;

                upload = Some(UploadVlogDto {
                    file: data,
                    original_filename,
                    content_type,
                    description: None,
                });
            }
            "description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("description field", e))?;
                description = Some(text);
            }
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    let mut upload =
        upload.ok_or_else(|| AppError::Validation("file: a video file is required".to_string()))?;
    upload.description = description;

    let uploaded = service.upload(upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(uploaded),
            Some("Vlog saved".to_string()),
            None,
        )),
    ))
}

/// Body limit hits surface as 413, everything else as a bad request
fn multipart_error(what: &str, e: MultipartError) -> AppError {
    debug!("Failed to read {}: {}", what, e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("file: upload exceeds the size limit ({})", e))
    } else {
        AppError::BadRequest(format!("Failed to read {}: {}", what, e))
    }
}

/// Stream one vlog payload
#[utoipa::path(
    get,
    path = "/vlogs/{id}",
    tag = "vlogs",
    params(("id" = String, Path, description = "Vlog record id")),
    responses(
        (status = 200, description = "Video payload", content_type = "application/octet-stream"),
        (status = 404, description = "Unknown vlog or missing payload")
    )
)]
pub async fn download_vlog(
    State(service): State<Arc<VlogService>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let (record, reader) = service.open(&id).await?;

    let content_type = record
        .content_type
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    let filename = if record.original_filename.is_empty() {
        record.filename.clone()
    } else {
        record.original_filename.clone()
    };

    let mut response = attachment(
        &content_type,
        &filename,
        Body::from_stream(ReaderStream::new(reader)),
    );
    if let Ok(length) = HeaderValue::from_str(&record.size.to_string()) {
        response.headers_mut().insert(header::CONTENT_LENGTH, length);
    }

    Ok(response)
}
