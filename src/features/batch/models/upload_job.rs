use std::path::PathBuf;

use crate::features::qr::RenderOptions;

/// One submitted CSV file waiting to be processed
#[derive(Debug, Clone)]
pub struct UploadJob {
    /// Spooled copy of the upload; removed once the job finishes
    pub path: PathBuf,
    pub original_name: Option<String>,
    pub size: usize,
    /// Shared by every row of the file
    pub options: RenderOptions,
}
