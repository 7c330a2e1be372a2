pub mod row;
pub mod upload_job;

pub use row::{AcceptedRow, Row, RowOutcome, SkipReason};
pub use upload_job::UploadJob;
