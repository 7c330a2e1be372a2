//! Server-rendered HTML pages.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Landing page with the upload and generation forms |

pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::PageService;
