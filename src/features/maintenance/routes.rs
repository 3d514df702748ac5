use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::maintenance::handlers::clear_all_data;
use crate::features::maintenance::services::ResetService;

/// Create routes for the maintenance feature
pub fn routes(service: Arc<ResetService>) -> Router {
    Router::new()
        .route("/clear_all_data", post(clear_all_data))
        .with_state(service)
}
