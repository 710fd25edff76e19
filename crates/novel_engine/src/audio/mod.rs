//! Audio playback
//!
//! A thin backend trait wraps the platform audio library; the
//! [`music::MusicDirector`] layers named tracks and volume fades on top of
//! the backend's raw volume setter.

pub mod backend;
pub mod music;

pub use backend::{AudioBackend, TrackHandle};
pub use music::MusicDirector;

/// Errors that can occur during audio operations
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// Audio device/output could not be opened
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// Operation attempted before the backend was initialized
    #[error("Audio backend not initialized")]
    BackendNotInitialized,

    /// Decoding or sink creation failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Handle does not refer to an active track
    #[error("Invalid track handle")]
    InvalidHandle,
}
