//! Transient storage for uploaded CSV files
//!
//! Each upload is streamed to its own file in the upload directory and
//! removed once the batch that consumes it has finished.

use axum::body::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use super::local_store::StorageResult;

/// Handle on the upload directory
#[derive(Debug, Clone)]
pub struct UploadSpool {
    base_path: PathBuf,
}

/// A file being written into the spool
pub struct SpooledFile {
    path: PathBuf,
    file: File,
    size: usize,
}

impl UploadSpool {
    /// Open the spool, creating the directory if needed
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await?;
        Ok(Self { base_path })
    }

    /// Create a new uniquely named spool file
    pub async fn create(&self) -> StorageResult<SpooledFile> {
        let path = self.base_path.join(Uuid::new_v4().simple().to_string());
        let file = File::create(&path).await?;

        debug!("Spooling upload to {}", path.display());
        Ok(SpooledFile {
            path,
            file,
            size: 0,
        })
    }

    /// Remove a spooled upload. Missing files are not an error.
    pub async fn discard(&self, path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => debug!("Removed spooled upload {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove spooled upload {}: {}", path.display(), e),
        }
    }
}

impl SpooledFile {
    pub async fn write_chunk(&mut self, chunk: &Bytes) -> StorageResult<()> {
        self.file.write_all(chunk).await?;
        self.size += chunk.len();
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush to disk and return the spooled path
    pub async fn finish(mut self) -> StorageResult<PathBuf> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        Ok(self.path)
    }
}
