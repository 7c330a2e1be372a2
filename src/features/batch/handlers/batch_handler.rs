use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, PlainTextError, Result};
use crate::features::batch::dtos::{BatchReportDto, UploadCsvDto};
use crate::features::batch::models::UploadJob;
use crate::features::batch::services::BatchService;
use crate::features::qr::RenderOptions;
use crate::modules::storage::UploadSpool;
use crate::shared::types::ApiResponse;

/// Multipart field carrying the CSV file
pub const CSV_FILE_FIELD: &str = "csvFile";

const BATCH_FAILURE_MESSAGE: &str = "Something went wrong while processing the CSV.";

/// Generate one PNG QR code per CSV row
///
/// Accepts multipart/form-data with:
/// - `csvFile`: CSV with `filename` and `url` columns (required)
/// - `width`, `colorDark`, `colorLight`: styling shared by every row (optional)
///
/// Rows missing `filename` or `url` are skipped; rows that fail to render are
/// reported and do not stop the batch. Errors are returned as plain text.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "qr",
    request_body(
        content = UploadCsvDto,
        content_type = "multipart/form-data",
        description = "CSV file plus optional styling fields",
    ),
    responses(
        (status = 200, description = "Batch processed", body = ApiResponse<BatchReportDto>),
        (status = 400, description = "Missing file, invalid styling or malformed CSV", content_type = "text/plain"),
        (status = 413, description = "Upload too large", content_type = "text/plain"),
        (status = 500, description = "Processing failed", content_type = "text/plain")
    )
)]
pub async fn upload_csv(
    State(service): State<Arc<BatchService>>,
    multipart: Multipart,
) -> std::result::Result<Json<ApiResponse<BatchReportDto>>, PlainTextError> {
    let plain = |e: AppError| PlainTextError::new(e, BATCH_FAILURE_MESSAGE);

    let job = receive_upload(&service, multipart).await.map_err(plain)?;
    let report = service.run(job).await.map_err(plain)?;
    let message = report.summary();

    Ok(Json(ApiResponse::success(Some(report), Some(message))))
}

/// Raw multipart values collected before validation
#[derive(Debug, Default)]
struct UploadForm {
    csv_path: Option<PathBuf>,
    original_name: Option<String>,
    size: usize,
    width: Option<String>,
    color_dark: Option<String>,
    color_light: Option<String>,
}

impl UploadForm {
    fn build_job(&self, service: &BatchService) -> Result<UploadJob> {
        let path = self
            .csv_path
            .clone()
            .ok_or_else(|| AppError::BadRequest(format!("{} is required", CSV_FILE_FIELD)))?;

        let options = RenderOptions::resolve(
            service.defaults(),
            self.width.as_deref(),
            self.color_dark.as_deref(),
            self.color_light.as_deref(),
        )?;

        Ok(UploadJob {
            path,
            original_name: self.original_name.clone(),
            size: self.size,
            options,
        })
    }
}

/// Spool the CSV and collect styling fields. The spooled file is removed
/// again if the request turns out to be invalid.
async fn receive_upload(service: &BatchService, mut multipart: Multipart) -> Result<UploadJob> {
    let mut form = UploadForm::default();

    let outcome = match read_fields(service.spool(), &mut multipart, &mut form).await {
        Ok(()) => form.build_job(service),
        Err(e) => Err(e),
    };

    if outcome.is_err() {
        if let Some(path) = &form.csv_path {
            service.spool().discard(path).await;
        }
    }

    outcome
}

async fn read_fields(
    spool: &UploadSpool,
    multipart: &mut Multipart,
    form: &mut UploadForm,
) -> Result<()> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            CSV_FILE_FIELD => {
                if form.csv_path.is_some() {
                    debug!("Ignoring additional {} field", CSV_FILE_FIELD);
                    continue;
                }

                form.original_name = field.file_name().map(|s| s.to_string());

                let mut file = spool.create().await?;
                form.csv_path = Some(file.path().to_path_buf());

                while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                    file.write_chunk(&chunk).await?;
                }

                form.size = file.size();
                file.finish().await?;
            }
            "width" => form.width = read_text(field).await?,
            "colorDark" => form.color_dark = read_text(field).await?,
            "colorLight" => form.color_light = read_text(field).await?,
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok(())
}

/// Trimmed text value; blank becomes `None`
async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<Option<String>> {
    let name = field.name().unwrap_or("").to_string();
    let text = field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))?;

    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart data: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload too large: {}", e.body_text()))
    } else {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
    }
}
