pub mod generate_dto;

pub use generate_dto::*;
