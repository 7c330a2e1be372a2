//! Gallery of generated artifacts.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/gallery` | JSON array of artifact names |
//! | GET | `/output/{name}` | Raw artifact bytes |

pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::GalleryService;
