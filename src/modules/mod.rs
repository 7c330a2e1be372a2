//! Modules layer - Infrastructure components
//!
//! Contains adapters for the filesystem storage used by the features.

pub mod storage;
