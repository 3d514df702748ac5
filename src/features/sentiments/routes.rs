use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::sentiments::handlers;
use crate::features::sentiments::services::SentimentService;

/// Create routes for the sentiments feature
pub fn routes(service: Arc<SentimentService>) -> Router {
    Router::new()
        .route("/sentiments", post(handlers::create_sentiment))
        .route("/export/sentiments", get(handlers::list_sentiments))
        .with_state(service)
}
