use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::sentiments::dtos::{CreateSentimentDto, SentimentResponseDto};
use crate::features::sentiments::services::SentimentService;
use crate::shared::types::{ApiResponse, CreatedDto, Meta};

/// Submit a sentiment
#[utoipa::path(
    post,
    path = "/sentiments",
    tag = "sentiments",
    request_body = CreateSentimentDto,
    responses(
        (status = 201, description = "Sentiment saved", body = ApiResponse<CreatedDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn create_sentiment(
    State(service): State<Arc<SentimentService>>,
    AppJson(dto): AppJson<CreateSentimentDto>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedDto>>)> {
    let created = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Sentiment saved".to_string()),
            None,
        )),
    ))
}

/// List all sentiments as JSON (display timezone)
#[utoipa::path(
    get,
    path = "/export/sentiments",
    tag = "sentiments",
    responses(
        (status = 200, description = "All sentiments", body = ApiResponse<Vec<SentimentResponseDto>>),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn list_sentiments(
    State(service): State<Arc<SentimentService>>,
) -> Result<Json<ApiResponse<Vec<SentimentResponseDto>>>> {
    let sentiments: Vec<SentimentResponseDto> = service
        .list(None)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = sentiments.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(sentiments),
        None,
        Some(Meta { total }),
    )))
}
