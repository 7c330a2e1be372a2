use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::core::config::QrConfig;
use crate::core::error::{AppError, Result};
use crate::shared::validation::HEX_COLOR_REGEX;

/// A validated color, normalized to `#rrggbb` or `#rrggbbaa`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor {
    normalized: String,
    rgba: [u8; 4],
}

impl HexColor {
    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`; short forms are expanded
    pub fn parse(value: &str) -> Option<Self> {
        if !HEX_COLOR_REGEX.is_match(value) {
            return None;
        }

        let digits = &value[1..];
        let expanded: String = if digits.len() <= 4 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        let expanded = expanded.to_ascii_lowercase();

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        let alpha = if expanded.len() == 8 { channel(6)? } else { 255 };

        Some(Self {
            rgba: [channel(0)?, channel(2)?, channel(4)?, alpha],
            normalized: format!("#{}", expanded),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Output encoding of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raster image
    #[default]
    Png,
    /// Vector markup
    Svg,
}

impl OutputFormat {
    /// Absent means PNG; anything other than `png`/`svg` is rejected
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("png") => Ok(OutputFormat::Png),
            Some("svg") => Ok(OutputFormat::Svg),
            Some(other) => Err(AppError::Validation(format!(
                "Unsupported format '{}'. Allowed formats: png, svg",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    /// `<stem>.<ext>`
    pub fn artifact_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

/// Defaults and limits applied when resolving request options
#[derive(Debug, Clone)]
pub struct RenderDefaults {
    pub width: u32,
    pub max_width: u32,
    pub dark: HexColor,
    pub light: HexColor,
}

impl RenderDefaults {
    pub fn from_config(config: &QrConfig) -> std::result::Result<Self, String> {
        let dark = HexColor::parse(&config.default_dark)
            .ok_or_else(|| format!("QR_DEFAULT_DARK is not a hex color: {}", config.default_dark))?;
        let light = HexColor::parse(&config.default_light).ok_or_else(|| {
            format!(
                "QR_DEFAULT_LIGHT is not a hex color: {}",
                config.default_light
            )
        })?;

        Ok(Self {
            width: config.default_width,
            max_width: config.max_width,
            dark,
            light,
        })
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            width: QrConfig::DEFAULT_WIDTH,
            max_width: QrConfig::DEFAULT_MAX_WIDTH,
            dark: HexColor {
                normalized: "#000000".to_string(),
                rgba: [0, 0, 0, 255],
            },
            light: HexColor {
                normalized: "#ffffff".to_string(),
                rgba: [255, 255, 255, 255],
            },
        }
    }
}

/// Styling shared by every artifact of one request.
///
/// Error correction is always level H and the margin always 4 modules; see
/// [`crate::features::qr::services::renderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u32,
    pub dark: HexColor,
    pub light: HexColor,
}

impl RenderOptions {
    /// Resolve raw request values. Missing values take the defaults, malformed
    /// ones are rejected.
    pub fn resolve(
        defaults: &RenderDefaults,
        width: Option<&str>,
        color_dark: Option<&str>,
        color_light: Option<&str>,
    ) -> Result<Self> {
        let width = match width {
            None => defaults.width,
            Some(raw) => {
                let parsed = raw.parse::<u32>().map_err(|_| {
                    AppError::Validation(format!("width must be a positive integer, got '{}'", raw))
                })?;
                if parsed == 0 || parsed > defaults.max_width {
                    return Err(AppError::Validation(format!(
                        "width must be between 1 and {}",
                        defaults.max_width
                    )));
                }
                parsed
            }
        };

        let color = |field: &str, raw: Option<&str>, default: &HexColor| match raw {
            None => Ok(default.clone()),
            Some(value) => HexColor::parse(value).ok_or_else(|| {
                AppError::Validation(format!(
                    "{} must be a hex color like #000000, got '{}'",
                    field, value
                ))
            }),
        };

        Ok(Self {
            width,
            dark: color("colorDark", color_dark, &defaults.dark)?,
            light: color("colorLight", color_light, &defaults.light)?,
        })
    }
}
