//! QR image rendering shared by the batch and single generation features.

pub mod models;
pub mod services;

pub use models::{OutputFormat, RenderDefaults, RenderOptions};
pub use services::{QrRenderer, RenderError};
