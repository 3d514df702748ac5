use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::gps::dtos::{CreateGpsDto, GpsResponseDto};
use crate::features::gps::services::GpsService;
use crate::shared::types::{ApiResponse, CreatedDto, Meta};

/// Submit a GPS coordinate
#[utoipa::path(
    post,
    path = "/gps",
    tag = "gps",
    request_body = CreateGpsDto,
    responses(
        (status = 201, description = "GPS coordinate saved", body = ApiResponse<CreatedDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn create_gps(
    State(service): State<Arc<GpsService>>,
    AppJson(dto): AppJson<CreateGpsDto>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedDto>>)> {
    let created = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("GPS coordinate saved".to_string()),
            None,
        )),
    ))
}

/// List all GPS coordinates as JSON (display timezone)
#[utoipa::path(
    get,
    path = "/export/gps",
    tag = "gps",
    responses(
        (status = 200, description = "All GPS coordinates", body = ApiResponse<Vec<GpsResponseDto>>),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn list_gps(
    State(service): State<Arc<GpsService>>,
) -> Result<Json<ApiResponse<Vec<GpsResponseDto>>>> {
    let coordinates: Vec<GpsResponseDto> = service
        .list(None)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = coordinates.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(coordinates),
        None,
        Some(Meta { total }),
    )))
}
