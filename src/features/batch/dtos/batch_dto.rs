use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::batch::models::SkipReason;

/// Multipart form for a CSV batch upload.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
#[serde(rename_all = "camelCase")]
pub struct UploadCsvDto {
    /// CSV file with a header line containing `filename` and `url` columns
    #[schema(format = Binary, content_media_type = "text/csv")]
    pub csv_file: String,
    /// Image width in pixels (default 300)
    #[schema(example = "300")]
    pub width: Option<String>,
    /// Foreground color (default #000000)
    #[schema(example = "#000000")]
    pub color_dark: Option<String>,
    /// Background color (default #ffffff)
    #[schema(example = "#ffffff")]
    pub color_light: Option<String>,
}

/// A row that was not rendered because of missing or invalid fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRowDto {
    pub line: u64,
    pub reason: SkipReason,
}

/// A row whose render or write failed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedRowDto {
    pub line: u64,
    pub filename: String,
    pub error: String,
}

/// Outcome of one batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchReportDto {
    /// Number of artifacts written
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Names of the artifacts written, in file order
    pub artifacts: Vec<String>,
    pub skipped_rows: Vec<SkippedRowDto>,
    pub failed_rows: Vec<FailedRowDto>,
}

impl BatchReportDto {
    pub fn record_success(&mut self, artifact: String) {
        self.processed += 1;
        self.artifacts.push(artifact);
    }

    pub fn record_skip(&mut self, line: u64, reason: SkipReason) {
        self.skipped += 1;
        self.skipped_rows.push(SkippedRowDto { line, reason });
    }

    pub fn record_failure(&mut self, line: u64, filename: String, error: String) {
        self.failed += 1;
        self.failed_rows.push(FailedRowDto {
            line,
            filename,
            error,
        });
    }

    /// Human readable summary used as the response message
    pub fn summary(&self) -> String {
        if self.skipped == 0 && self.failed == 0 {
            return "QR codes generated!".to_string();
        }
        format!(
            "QR codes generated: {} written, {} skipped, {} failed",
            self.processed, self.skipped, self.failed
        )
    }
}
