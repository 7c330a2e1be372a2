pub mod renderer;

pub use renderer::{QrRenderer, RenderError};
