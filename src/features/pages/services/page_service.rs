use minijinja::context;

use crate::core::error::{AppError, Result};
use crate::features::qr::RenderDefaults;
use crate::shared::templates::TemplateEngine;

const INDEX_TEMPLATE: &str = "index.jinja";

/// Renders the HTML pages
pub struct PageService {
    templates: TemplateEngine,
    defaults: RenderDefaults,
    title: String,
}

impl PageService {
    pub fn new(templates: TemplateEngine, defaults: RenderDefaults, title: String) -> Self {
        Self {
            templates,
            defaults,
            title,
        }
    }

    /// Landing page with the upload and generation forms
    pub fn render_index(&self) -> Result<String> {
        // <input type="color"> only understands #rrggbb
        let picker = |color: &str| color.chars().take(7).collect::<String>();

        self.templates
            .render(
                INDEX_TEMPLATE,
                context! {
                    title => &self.title,
                    default_width => self.defaults.width,
                    max_width => self.defaults.max_width,
                    default_dark => picker(self.defaults.dark.as_str()),
                    default_light => picker(self.defaults.light.as_str()),
                },
            )
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}
