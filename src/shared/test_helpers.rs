use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use crate::features::batch::BatchService;
use crate::features::gallery::GalleryService;
use crate::features::generate::GenerateService;
use crate::features::qr::{QrRenderer, RenderDefaults};
use crate::modules::storage::{ArtifactStore, LocalArtifactStore, UploadSpool};

/// Isolated output and upload directories for one test
pub struct TestEnv {
    _root: TempDir,
    output_dir: PathBuf,
    upload_dir: PathBuf,
    store: Arc<LocalArtifactStore>,
    spool: UploadSpool,
}

impl TestEnv {
    pub async fn new() -> Self {
        let root = TempDir::new().unwrap();
        let output_dir = root.path().join("output");
        let upload_dir = root.path().join("uploads");

        let store = Arc::new(LocalArtifactStore::new(&output_dir).await.unwrap());
        let spool = UploadSpool::new(&upload_dir).await.unwrap();

        Self {
            _root: root,
            output_dir,
            upload_dir,
            store,
            spool,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn store(&self) -> Arc<dyn ArtifactStore> {
        self.store.clone()
    }

    pub fn batch_service(&self) -> BatchService {
        self.batch_service_with_store(self.store())
    }

    /// Batch service writing through `store` instead of the local output dir
    pub fn batch_service_with_store(&self, store: Arc<dyn ArtifactStore>) -> BatchService {
        BatchService::new(
            store,
            self.spool.clone(),
            QrRenderer::new(),
            RenderDefaults::default(),
        )
    }

    pub fn generate_service(&self) -> GenerateService {
        GenerateService::new(self.store(), QrRenderer::new(), RenderDefaults::default())
    }

    pub fn gallery_service(&self) -> GalleryService {
        GalleryService::new(self.store())
    }

    /// Write `content` into the upload spool as if it had been uploaded
    pub async fn spool_bytes(&self, content: &[u8]) -> PathBuf {
        let mut file = self.spool.create().await.unwrap();
        file.write_chunk(&axum::body::Bytes::copy_from_slice(content))
            .await
            .unwrap();
        file.finish().await.unwrap()
    }

    pub async fn spool_csv(&self, csv: &str) -> PathBuf {
        self.spool_bytes(csv.as_bytes()).await
    }

    /// Sorted names of the finished artifacts in the output directory
    pub async fn artifact_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .store
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();
        names
    }
}
