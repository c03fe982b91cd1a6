//! Domain layer for the zgallery plugin.
//!
//! Core types with no dependency on Zellij or the HTTP layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Image result and page models

pub mod error;
pub mod image;

pub use error::{FetchError, GalleryError, Result};
pub use image::{ImageItem, SearchPage};
