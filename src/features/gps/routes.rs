use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::gps::handlers;
use crate::features::gps::services::GpsService;

/// Create routes for the GPS feature
pub fn routes(service: Arc<GpsService>) -> Router {
    Router::new()
        .route("/gps", post(handlers::create_gps))
        .route("/export/gps", get(handlers::list_gps))
        .with_state(service)
}
