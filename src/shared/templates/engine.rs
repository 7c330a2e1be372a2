//! HTML page templates using Jinja2 syntax.
//!
//! Pages are embedded in the binary; files with the same name found under the
//! configured template directory replace the embedded version.

use minijinja::{Environment, Value};
use std::path::Path;
use thiserror::Error;

/// Templates compiled into the binary
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[(
    "index.jinja",
    include_str!("../../../templates/pages/index.jinja"),
)];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Build the engine from the embedded pages, applying overrides from
    /// `override_dir` when it exists.
    pub fn new(override_dir: &Path) -> Self {
        let mut env = Environment::new();

        for &(name, source) in EMBEDDED_TEMPLATES {
            if let Err(e) = env.add_template(name, source) {
                tracing::error!("Embedded template {} is invalid: {}", name, e);
            }
        }

        if override_dir.is_dir() {
            load_templates_recursive(&mut env, override_dir, override_dir);
        }

        Self { env }
    }

    pub fn render(&self, template_name: &str, ctx: Value) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let Ok(entries) = std::fs::read_dir(current_path) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "jinja") {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        let template_name = relative.to_string_lossy().replace('\\', "/");

        match std::fs::read_to_string(&path) {
            Ok(content) => match env.add_template_owned(template_name.clone(), content) {
                Ok(()) => tracing::debug!("Loaded template override: {}", template_name),
                Err(e) => tracing::warn!("Failed to load template {}: {}", template_name, e),
            },
            Err(e) => tracing::warn!("Failed to read template {}: {}", path.display(), e),
        }
    }
}
