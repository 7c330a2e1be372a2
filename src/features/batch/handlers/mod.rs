pub mod batch_handler;

pub use batch_handler::*;
