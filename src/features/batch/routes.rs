use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::batch::handlers::upload_csv;
use crate::features::batch::services::BatchService;

/// Create routes for the batch feature
pub fn routes(service: Arc<BatchService>, max_upload_size: usize) -> Router {
    Router::new()
        .route(
            "/upload",
            // Allow body size up to the configured limit + buffer for multipart overhead
            post(upload_csv).layer(DefaultBodyLimit::max(max_upload_size + 64 * 1024)),
        )
        .with_state(service)
}
