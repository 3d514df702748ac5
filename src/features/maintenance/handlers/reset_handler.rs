use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::maintenance::dtos::{ClearAllQuery, ClearAllResult};
use crate::features::maintenance::services::ResetService;
use crate::shared::types::ApiResponse;

/// Delete every sentiment, GPS fix and vlog
///
/// Requires `?confirm=true`. Steps that fail are reported per collection;
/// the others still run.
#[utoipa::path(
    post,
    path = "/clear_all_data",
    tag = "maintenance",
    params(ClearAllQuery),
    responses(
        (status = 200, description = "Reset ran; see per-step results", body = ApiResponse<ClearAllResult>),
        (status = 400, description = "Missing confirmation flag")
    )
)]
pub async fn clear_all_data(
    State(service): State<Arc<ResetService>>,
    Query(query): Query<ClearAllQuery>,
) -> Result<Json<ApiResponse<ClearAllResult>>> {
    let result = service.clear_all(query.confirm.unwrap_or(false)).await?;
    let message = if result.success {
        "All data cleared"
    } else {
        "Data cleared with errors"
    };

    Ok(Json(ApiResponse {
        success: result.success,
        data: Some(result),
        message: Some(message.to_string()),
        meta: None,
        errors: None,
    }))
}
