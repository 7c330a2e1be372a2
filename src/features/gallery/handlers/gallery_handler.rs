use axum::{extract::State, response::Response, Json};
use std::sync::Arc;

use crate::features::gallery::services::GalleryService;
use crate::shared::types::ErrorResponse;

/// List generated artifacts
///
/// Returns the names of every `.png` and `.svg` artifact in the output
/// directory, in directory order. Each one is downloadable under `/output/{name}`.
#[utoipa::path(
    get,
    path = "/gallery",
    tag = "qr",
    responses(
        (status = 200, description = "Artifact names", body = Vec<String>),
        (status = 500, description = "Output directory unreadable", body = ErrorResponse)
    )
)]
pub async fn list_gallery(
    State(service): State<Arc<GalleryService>>,
) -> Result<Json<Vec<String>>, Response> {
    let names = service
        .list()
        .await
        .map_err(|e| e.into_json_response("Failed to load gallery."))?;

    Ok(Json(names))
}
