use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::batch::dtos::BatchReportDto;
use crate::features::batch::models::{AcceptedRow, Row, RowOutcome, UploadJob};
use crate::features::batch::services::row_extractor;
use crate::features::qr::{OutputFormat, QrRenderer, RenderDefaults, RenderOptions};
use crate::modules::storage::{ArtifactStore, UploadSpool};

/// Turns an uploaded CSV into one PNG artifact per valid row.
///
/// Rows are rendered strictly one after another. A failing row is recorded in
/// the report and the batch moves on; the spooled upload is removed exactly
/// once, after every row has been attempted.
pub struct BatchService {
    store: Arc<dyn ArtifactStore>,
    spool: UploadSpool,
    renderer: QrRenderer,
    defaults: RenderDefaults,
}

impl BatchService {
    pub fn new(
        store: Arc<dyn ArtifactStore>,
        spool: UploadSpool,
        renderer: QrRenderer,
        defaults: RenderDefaults,
    ) -> Self {
        Self {
            store,
            spool,
            renderer,
            defaults,
        }
    }

    pub fn defaults(&self) -> &RenderDefaults {
        &self.defaults
    }

    pub fn spool(&self) -> &UploadSpool {
        &self.spool
    }

    /// Process an upload job and remove its spooled file
    pub async fn run(&self, job: UploadJob) -> Result<BatchReportDto> {
        info!(
            "Batch started: file={:?}, size={}, width={}, dark={}, light={}",
            job.original_name, job.size, job.options.width, job.options.dark, job.options.light
        );

        let result = self.process(&job).await;
        self.spool.discard(&job.path).await;

        match &result {
            Ok(report) => info!(
                "Batch finished: processed={}, skipped={}, failed={}",
                report.processed, report.skipped, report.failed
            ),
            Err(e) => warn!("Batch aborted: {}", e),
        }

        result
    }

    async fn process(&self, job: &UploadJob) -> Result<BatchReportDto> {
        let rows = load_rows(&job.path).await?;
        debug!("Loaded {} rows from {}", rows.len(), job.path.display());

        let mut report = BatchReportDto::default();

        for row in rows {
            match row.classify() {
                RowOutcome::Skipped { line, reason } => {
                    debug!("Skipping line {}: {:?}", line, reason);
                    report.record_skip(line, reason);
                }
                RowOutcome::Accepted(row) => match self.render_row(&row, &job.options).await {
                    Ok(name) => report.record_success(name),
                    Err(e) => {
                        warn!(
                            "Failed to generate line {} ({}): {}",
                            row.line, row.filename, e
                        );
                        report.record_failure(row.line, row.filename, e.to_string());
                    }
                },
            }
        }

        Ok(report)
    }

    async fn render_row(&self, row: &AcceptedRow, options: &RenderOptions) -> Result<String> {
        let format = OutputFormat::Png;
        let name = format.artifact_name(&row.filename);

        let artifact = self
            .renderer
            .render(row.url.clone(), options.clone(), format)
            .await?;
        self.store.put(&name, artifact.bytes).await?;

        Ok(name)
    }
}

/// Read every row of the spooled file into memory before rendering starts
async fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<Vec<Row>> {
        let file = File::open(&path)
            .map_err(|e| AppError::Internal(format!("Failed to open upload: {}", e)))?;
        let rows = row_extractor::extract(file)?.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    })
    .await
    .map_err(|e| AppError::Internal(format!("CSV parsing task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::batch::models::SkipReason;
    use crate::modules::storage::StorageError;
    use crate::shared::test_helpers::TestEnv;
    use async_trait::async_trait;

    /// Delegates to the local store but refuses to write one artifact name
    struct RejectingStore {
        inner: Arc<dyn ArtifactStore>,
        rejected: &'static str,
    }

    #[async_trait]
    impl ArtifactStore for RejectingStore {
        async fn put(&self, name: &str, bytes: Vec<u8>) -> std::result::Result<(), StorageError> {
            if name == self.rejected {
                return Err(StorageError::WriteFailed {
                    name: name.to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.put(name, bytes).await
        }

        async fn list(&self) -> std::result::Result<Vec<String>, StorageError> {
            self.inner.list().await
        }
    }

    async fn job_for(env: &TestEnv, csv: &str) -> UploadJob {
        let path = env.spool_csv(csv).await;
        UploadJob {
            path,
            original_name: Some("rows.csv".to_string()),
            size: csv.len(),
            options: RenderOptions::resolve(&RenderDefaults::default(), Some("120"), None, None)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_run_writes_one_png_per_valid_row() {
        let env = TestEnv::new().await;
        let service = env.batch_service();
        let job = job_for(
            &env,
            "filename,url\na,https://a.example\nb,https://b.example\n",
        )
        .await;
        let spooled = job.path.clone();

        let report = service.run(job).await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.artifacts, vec!["a.png", "b.png"]);
        assert!(env.output_dir().join("a.png").is_file());
        assert!(env.output_dir().join("b.png").is_file());
        assert!(!spooled.exists());
    }

    #[tokio::test]
    async fn test_run_skips_incomplete_rows() {
        let env = TestEnv::new().await;
        let service = env.batch_service();
        let job = job_for(
            &env,
            "filename,url\n,https://nameless.example\nno-url,\nok,https://ok.example\n",
        )
        .await;

        let report = service.run(job).await.unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.skipped_rows[0].line, 2);
        assert_eq!(report.skipped_rows[0].reason, SkipReason::MissingFilename);
        assert_eq!(report.skipped_rows[1].reason, SkipReason::MissingUrl);
        assert_eq!(env.artifact_names().await, vec!["ok.png"]);
    }

    #[tokio::test]
    async fn test_run_continues_after_render_failure() {
        let env = TestEnv::new().await;
        let service = env.batch_service();
        let too_long = "x".repeat(3000);
        let csv = format!(
            "filename,url\nfirst,https://first.example\nhuge,{}\nlast,https://last.example\n",
            too_long
        );
        let job = job_for(&env, &csv).await;
        let spooled = job.path.clone();

        let report = service.run(job).await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failed_rows[0].filename, "huge");
        assert_eq!(report.failed_rows[0].line, 3);
        assert_eq!(env.artifact_names().await, vec!["first.png", "last.png"]);
        assert!(!spooled.exists());
    }

    #[tokio::test]
    async fn test_run_continues_after_store_failure() {
        let env = TestEnv::new().await;
        let store = Arc::new(RejectingStore {
            inner: env.store(),
            rejected: "middle.png",
        });
        let service = env.batch_service_with_store(store);
        let job = job_for(
            &env,
            "filename,url\nfirst,https://first.example\nmiddle,https://middle.example\nlast,https://last.example\n",
        )
        .await;
        let spooled = job.path.clone();

        let report = service.run(job).await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failed_rows[0].filename, "middle");
        assert_eq!(report.failed_rows[0].line, 3);
        assert!(report.failed_rows[0].error.contains("disk full"));
        assert_eq!(env.artifact_names().await, vec!["first.png", "last.png"]);
        assert!(!spooled.exists());
    }

    #[tokio::test]
    async fn test_run_removes_upload_on_parse_error() {
        let env = TestEnv::new().await;
        let service = env.batch_service();
        let path = env.spool_bytes(b"filename,url\n\xff\xfe,https://example.com\n").await;
        let job = UploadJob {
            path: path.clone(),
            original_name: None,
            size: 0,
            options: RenderOptions::resolve(&RenderDefaults::default(), None, None, None)
                .unwrap(),
        };

        let err = service.run(job).await.unwrap_err();

        assert!(matches!(err, AppError::Parse(_)));
        assert!(!path.exists());
        assert!(env.artifact_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_overwrites_duplicate_filenames() {
        let env = TestEnv::new().await;
        let service = env.batch_service();
        let job = job_for(
            &env,
            "filename,url\nsame,https://one.example\nsame,https://two.example\n",
        )
        .await;

        let report = service.run(job).await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(env.artifact_names().await, vec!["same.png"]);
    }
}
