//! Page template rendering.

pub mod engine;

pub use engine::{TemplateEngine, TemplateError};
