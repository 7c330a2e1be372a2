use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::types::lenient_string;
use crate::shared::validation::validate_artifact_stem;

/// Fields of a single QR generation request (form or JSON)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrDto {
    /// Payload encoded into the QR code
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(required(message = "url is required"))]
    #[schema(example = "https://example.com")]
    pub url: Option<String>,

    /// Artifact name without extension
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(
        required(message = "filename is required"),
        custom(function = "validate_artifact_stem")
    )]
    #[schema(example = "a")]
    pub filename: Option<String>,

    /// `png` (default) or `svg`
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "svg")]
    pub format: Option<String>,

    /// Image width in pixels (default 300)
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "150")]
    pub width: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "#111111")]
    pub color_dark: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "#eeeeee")]
    pub color_light: Option<String>,
}

/// Response for a generated artifact
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponseDto {
    pub success: bool,
    /// Artifact name, downloadable under `/output/{download}`
    #[schema(example = "a.svg")]
    pub download: String,
}
