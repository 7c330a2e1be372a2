use std::sync::Arc;

use crate::core::error::Result;
use crate::features::qr::OutputFormat;
use crate::modules::storage::ArtifactStore;

const GALLERY_FORMATS: [OutputFormat; 2] = [OutputFormat::Png, OutputFormat::Svg];

/// Lists generated artifacts
pub struct GalleryService {
    store: Arc<dyn ArtifactStore>,
}

impl GalleryService {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// Artifact names ending in `.png` or `.svg`, in storage order
    pub async fn list(&self) -> Result<Vec<String>> {
        let names = self.store.list().await?;

        Ok(names
            .into_iter()
            .filter(|name| is_gallery_artifact(name))
            .collect())
    }
}

fn is_gallery_artifact(name: &str) -> bool {
    GALLERY_FORMATS
        .iter()
        .any(|format| name.ends_with(&format!(".{}", format.extension())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::TestEnv;

    #[test]
    fn test_is_gallery_artifact() {
        assert!(is_gallery_artifact("a.png"));
        assert!(is_gallery_artifact("b.svg"));
        assert!(!is_gallery_artifact("notes.txt"));
        assert!(!is_gallery_artifact("a.png.bak"));
        assert!(!is_gallery_artifact("png"));
    }

    #[tokio::test]
    async fn test_list_filters_extensions() {
        let env = TestEnv::new().await;
        std::fs::write(env.output_dir().join("a.png"), b"png").unwrap();
        std::fs::write(env.output_dir().join("b.svg"), b"<svg/>").unwrap();
        std::fs::write(env.output_dir().join("readme.txt"), b"text").unwrap();

        let mut names = env.gallery_service().list().await.unwrap();
        names.sort();

        assert_eq!(names, vec!["a.png", "b.svg"]);
    }
}
