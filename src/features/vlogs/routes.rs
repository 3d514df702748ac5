use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::vlogs::handlers::{download_vlog, upload_vlog};
use crate::features::vlogs::services::VlogService;

/// Headroom for multipart boundaries and the description field
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create routes for the vlogs feature
pub fn routes(service: Arc<VlogService>) -> Router {
    let body_limit = service.max_size() + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/vlogs",
            post(upload_vlog).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/vlogs/{id}", get(download_vlog))
        .with_state(service)
}
