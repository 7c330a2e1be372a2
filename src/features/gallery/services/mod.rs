pub mod gallery_service;

pub use gallery_service::GalleryService;
