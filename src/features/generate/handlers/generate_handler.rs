use axum::{extract::State, response::Response, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::FormOrJson;
use crate::features::generate::dtos::{GenerateQrDto, GenerateResponseDto};
use crate::features::generate::services::GenerateService;
use crate::shared::types::ErrorResponse;

const GENERATE_FAILURE_MESSAGE: &str = "Failed to generate QR code.";

/// Generate a single QR code
///
/// Accepts an url-encoded form or a JSON body. `format` selects `png`
/// (default) or `svg`; the artifact is written as `{filename}.{format}` and
/// replaces any previous artifact with that name.
#[utoipa::path(
    post,
    path = "/generate",
    tag = "qr",
    request_body(
        content = GenerateQrDto,
        content_type = "application/x-www-form-urlencoded",
        description = "Generation fields; application/json is accepted as well",
    ),
    responses(
        (status = 200, description = "Artifact generated", body = GenerateResponseDto),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 500, description = "Rendering or storage failed", body = ErrorResponse)
    )
)]
pub async fn generate_qr(
    State(service): State<Arc<GenerateService>>,
    FormOrJson(dto): FormOrJson<GenerateQrDto>,
) -> Result<Json<GenerateResponseDto>, Response> {
    let fail = |e: AppError| e.into_json_response(GENERATE_FAILURE_MESSAGE);

    dto.validate()
        .map_err(|e| fail(AppError::Validation(e.to_string())))?;

    let download = service.generate(dto).await.map_err(fail)?;

    Ok(Json(GenerateResponseDto {
        success: true,
        download,
    }))
}
