//! Storage module for generated artifacts and transient uploads
//!
//! Provides the filesystem-backed artifact store injected into services, and
//! the spool used to hold uploaded CSV files while a batch runs.

mod local_store;
mod upload_spool;

pub use local_store::{ArtifactStore, LocalArtifactStore, StorageError};
pub use upload_spool::UploadSpool;
