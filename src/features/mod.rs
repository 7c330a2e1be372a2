pub mod batch;
pub mod gallery;
pub mod generate;
pub mod pages;
pub mod qr;
