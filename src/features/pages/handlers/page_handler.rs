use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::pages::services::PageService;

/// Landing page
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses(
        (status = 200, description = "HTML landing page", content_type = "text/html", body = String)
    )
)]
pub async fn index(State(service): State<Arc<PageService>>) -> Result<Html<String>> {
    Ok(Html(service.render_index()?))
}
