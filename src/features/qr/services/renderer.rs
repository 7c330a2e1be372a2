//! QR code rendering to PNG and SVG.
//!
//! Every artifact is encoded at error-correction level H with a 4-module
//! quiet zone.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use std::fmt::Write;
use std::io::Cursor;
use thiserror::Error;

use crate::features::qr::models::{OutputFormat, RenderOptions};

pub const ERROR_CORRECTION: EcLevel = EcLevel::H;

/// Quiet zone around the symbol, in modules
pub const MARGIN_MODULES: u32 = 4;

/// Pixels per module when the requested width cannot fit the symbol
const FALLBACK_MODULE_PIXELS: u32 = 4;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("payload cannot be encoded as a QR code: {0}")]
    Encode(#[from] QrError),

    #[error("failed to encode PNG: {0}")]
    Image(#[from] image::ImageError),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Encoded artifact ready to be stored
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QrRenderer;

impl QrRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render on the blocking pool; encoding large symbols is CPU bound.
    pub async fn render(
        &self,
        payload: String,
        options: RenderOptions,
        format: OutputFormat,
    ) -> Result<RenderedArtifact, RenderError> {
        let renderer = *self;
        tokio::task::spawn_blocking(move || renderer.render_blocking(&payload, &options, format))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }

    pub fn render_blocking(
        &self,
        payload: &str,
        options: &RenderOptions,
        format: OutputFormat,
    ) -> Result<RenderedArtifact, RenderError> {
        let bytes = match format {
            OutputFormat::Png => self.render_png(payload, options)?,
            OutputFormat::Svg => self.render_svg(payload, options)?.into_bytes(),
        };

        Ok(RenderedArtifact { format, bytes })
    }

    /// PNG of exactly `options.width` pixels square, or 4 px per module when
    /// the width is smaller than the symbol plus margin.
    pub fn render_png(&self, payload: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        let code = encode(payload)?;
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let total = modules + 2 * MARGIN_MODULES;

        let side = if options.width >= total {
            options.width
        } else {
            total * FALLBACK_MODULE_PIXELS
        };

        let dark = Rgba(options.dark.rgba());
        let light = Rgba(options.light.rgba());

        // Module index for each pixel row/column, offset by the margin
        let module_at = |px: u32| -> Option<u32> {
            let m = (px as u64 * total as u64 / side as u64) as u32;
            m.checked_sub(MARGIN_MODULES).filter(|m| *m < modules)
        };
        let lookup: Vec<Option<u32>> = (0..side).map(module_at).collect();

        let mut img = RgbaImage::from_pixel(side, side, light);
        for (py, my) in lookup.iter().enumerate() {
            let Some(my) = my else { continue };
            for (px, mx) in lookup.iter().enumerate() {
                let Some(mx) = mx else { continue };
                let idx = (*my * modules + *mx) as usize;
                if colors[idx] == Color::Dark {
                    img.put_pixel(px as u32, py as u32, dark);
                }
            }
        }

        let mut png_bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;

        Ok(png_bytes)
    }

    /// SVG markup `options.width` pixels square.
    ///
    /// The `viewBox` is in module units (symbol plus margin), so the canvas
    /// scales to any width without rounding to whole pixels per module.
    pub fn render_svg(&self, payload: &str, options: &RenderOptions) -> Result<String, RenderError> {
        let code = encode(payload)?;
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let total = modules + 2 * MARGIN_MODULES;

        // One horizontal run per stretch of dark modules
        let mut path = String::new();
        for y in 0..modules {
            let mut x = 0;
            while x < modules {
                if colors[(y * modules + x) as usize] != Color::Dark {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < modules && colors[(y * modules + x) as usize] == Color::Dark {
                    x += 1;
                }
                let _ = write!(
                    path,
                    "M{} {}h{}v1h-{}z",
                    start + MARGIN_MODULES,
                    y + MARGIN_MODULES,
                    x - start,
                    x - start
                );
            }
        }

        Ok(format!(
            concat!(
                r#"<?xml version="1.0" standalone="yes"?>"#,
                r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{width}" height="{width}" viewBox="0 0 {total} {total}" shape-rendering="crispEdges">"#,
                r#"<rect x="0" y="0" width="{total}" height="{total}" fill="{light}"/>"#,
                r#"<path fill="{dark}" d="{path}"/>"#,
                "</svg>"
            ),
            width = options.width,
            total = total,
            light = options.light,
            dark = options.dark,
            path = path,
        ))
    }
}

fn encode(payload: &str) -> Result<QrCode, RenderError> {
    Ok(QrCode::with_error_correction_level(
        payload.as_bytes(),
        ERROR_CORRECTION,
    )?)
}
