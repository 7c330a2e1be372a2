use utoipa::{Modify, OpenApi};

use crate::features::batch::{dtos as batch_dtos, handlers as batch_handlers, models as batch_models};
use crate::features::gallery::handlers as gallery_handlers;
use crate::features::generate::{dtos as generate_dtos, handlers as generate_handlers};
use crate::features::pages::handlers as pages_handlers;
use crate::features::qr::OutputFormat;
use crate::shared::types::{ApiResponse, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Pages
        pages_handlers::index,
        // Batch
        batch_handlers::upload_csv,
        // Single code
        generate_handlers::generate_qr,
        // Gallery
        gallery_handlers::list_gallery,
    ),
    components(
        schemas(
            ErrorResponse,
            OutputFormat,
            // Batch
            batch_dtos::UploadCsvDto,
            batch_dtos::SkippedRowDto,
            batch_dtos::FailedRowDto,
            batch_dtos::BatchReportDto,
            batch_models::SkipReason,
            ApiResponse<batch_dtos::BatchReportDto>,
            // Single code
            generate_dtos::GenerateQrDto,
            generate_dtos::GenerateResponseDto,
        )
    ),
    tags(
        (name = "qr", description = "QR code generation and gallery"),
        (name = "pages", description = "Browser interface"),
    ),
    info(
        title = "QR Generator API",
        version = "0.1.0",
        description = "Batch and single QR code generation",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/upload", "/generate", "/gallery"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier_overrides_info() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
