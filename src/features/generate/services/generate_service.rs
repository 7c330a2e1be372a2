use std::sync::Arc;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::generate::dtos::GenerateQrDto;
use crate::features::qr::{OutputFormat, QrRenderer, RenderDefaults, RenderOptions};
use crate::modules::storage::ArtifactStore;

/// Service rendering one artifact per request
pub struct GenerateService {
    store: Arc<dyn ArtifactStore>,
    renderer: QrRenderer,
    defaults: RenderDefaults,
}

impl GenerateService {
    pub fn new(store: Arc<dyn ArtifactStore>, renderer: QrRenderer, defaults: RenderDefaults) -> Self {
        Self {
            store,
            renderer,
            defaults,
        }
    }

    /// Render and store the artifact, returning its name.
    ///
    /// An existing artifact with the same name is overwritten.
    pub async fn generate(&self, dto: GenerateQrDto) -> Result<String> {
        let url = dto
            .url
            .ok_or_else(|| AppError::Validation("url is required".to_string()))?;
        let filename = dto
            .filename
            .ok_or_else(|| AppError::Validation("filename is required".to_string()))?;

        let format = OutputFormat::parse(dto.format.as_deref())?;
        let options = RenderOptions::resolve(
            &self.defaults,
            dto.width.as_deref(),
            dto.color_dark.as_deref(),
            dto.color_light.as_deref(),
        )?;

        let width = options.width;
        let artifact = self.renderer.render(url, options, format).await?;
        let name = artifact.format.artifact_name(&filename);
        let size = artifact.bytes.len();
        self.store.put(&name, artifact.bytes).await?;

        info!(
            "Artifact generated: name={}, format={:?}, width={}, size={}",
            name, format, width, size
        );

        Ok(name)
    }
}
