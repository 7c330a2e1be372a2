pub mod batch_service;
pub mod row_extractor;

pub use batch_service::BatchService;
pub use row_extractor::ParseError;
