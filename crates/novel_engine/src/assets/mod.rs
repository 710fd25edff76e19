//! Asset loading
//!
//! Image loading for backgrounds and character sprites. Every load failure
//! here is recoverable: callers substitute a flat placeholder instead of
//! aborting the scene.

pub mod image_loader;

pub use image_loader::ImageData;

/// Errors that can occur while loading assets
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// Failed to read or decode an asset file
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),
}
