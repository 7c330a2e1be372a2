use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::pages::handlers;
use crate::features::pages::services::PageService;

/// Create routes for the HTML pages
pub fn routes(service: Arc<PageService>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .with_state(service)
}
