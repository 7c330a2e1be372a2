//! Filesystem-backed artifact store
//!
//! Artifacts live flat in a single output directory which is also served
//! statically under `/output`.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::shared::validation::validate_artifact_stem;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid artifact name: {0}")]
    InvalidKey(String),

    #[error("Failed to write '{name}': {source}")]
    WriteFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read storage directory {path}: {source}")]
    ListFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage handle for generated artifacts.
///
/// Services receive this as `Arc<dyn ArtifactStore>` instead of touching the
/// output directory directly.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store `bytes` under `name`, replacing any previous artifact of that name
    async fn put(&self, name: &str, bytes: Vec<u8>) -> StorageResult<()>;

    /// Names of every stored entry, in storage order
    async fn list(&self) -> StorageResult<Vec<String>>;
}

/// Local filesystem implementation of [`ArtifactStore`]
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    base_path: PathBuf,
}

impl LocalArtifactStore {
    /// Open the store, creating the directory if needed
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await?;

        info!("Artifact store ready at {}", base_path.display());
        Ok(Self { base_path })
    }

    /// Resolve an artifact name to a path inside the base directory
    fn key_to_path(&self, name: &str) -> StorageResult<PathBuf> {
        validate_artifact_stem(name).map_err(|e| {
            StorageError::InvalidKey(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| name.to_string()),
            )
        })?;

        Ok(self.base_path.join(name))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn put(&self, name: &str, bytes: Vec<u8>) -> StorageResult<()> {
        let path = self.key_to_path(name)?;

        // Write next to the target, then rename, so readers never see a torn file
        let staging = self
            .base_path
            .join(format!(".{}.{}.partial", name, Uuid::new_v4()));

        let write_result = async {
            fs::write(&staging, &bytes).await?;
            fs::rename(&staging, &path).await
        }
        .await;

        if let Err(source) = write_result {
            let _ = fs::remove_file(&staging).await;
            return Err(StorageError::WriteFailed {
                name: name.to_string(),
                source,
            });
        }

        debug!("Stored artifact {} ({} bytes)", name, bytes.len());
        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        let list_err = |source| StorageError::ListFailed {
            path: self.base_path.display().to_string(),
            source,
        };

        let mut entries = fs::read_dir(&self.base_path).await.map_err(list_err)?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_and_list() {
        let dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        store.put("a.png", vec![1, 2, 3]).await.unwrap();
        store.put("b.svg", b"<svg/>".to_vec()).await.unwrap();

        let mut names = store.list().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["a.png", "b.svg"]);
        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_artifact() {
        let dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(dir.path()).await.unwrap();

        store.put("a.svg", b"first".to_vec()).await.unwrap();
        store.put("a.svg", b"second".to_vec()).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.svg")).unwrap(), b"second");
        assert_eq!(store.list().await.unwrap(), vec!["a.svg"]);
    }

    #[tokio::test]
    async fn test_put_rejects_path_like_names() {
        let dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(dir.path().join("out")).await.unwrap();

        let err = store.put("../escape.png", vec![0]).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(!dir.path().join("escape.png").exists());
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("output");
        let store = LocalArtifactStore::new(&nested).await.unwrap();

        assert!(nested.is_dir());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = LocalArtifactStore::new(dir.path().join("gone")).await.unwrap();
        std::fs::remove_dir(dir.path().join("gone")).unwrap();

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StorageError::ListFailed { .. }));
    }
}
