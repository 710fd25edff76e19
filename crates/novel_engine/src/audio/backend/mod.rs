//! Audio backend implementations
//!
//! Platform-independent abstraction over audio playback. The engine only
//! ever needs these black-box operations; fades and track bookkeeping live
//! above the trait in [`crate::audio::music`].

pub mod null_backend;
pub mod rodio_backend;

pub use null_backend::NullBackend;
pub use rodio_backend::RodioBackend;

use crate::audio::AudioError;
use std::path::Path;

/// Handle for tracking an active track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackHandle {
    /// Unique identifier for the track instance
    pub id: u32,
}

impl TrackHandle {
    /// Create a new track handle
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

/// Audio backend trait for platform abstraction
///
/// Single-threaded by design; all calls happen on the frame loop between
/// renders.
pub trait AudioBackend {
    /// Start playing an audio file, optionally looping forever
    fn play_from_path(&mut self, path: &Path, looped: bool) -> Result<TrackHandle, AudioError>;

    /// Stop a track (idempotent: unknown handles succeed)
    fn stop(&mut self, handle: TrackHandle) -> Result<(), AudioError>;

    /// Set the volume of a track (0.0 = silent, 1.0 = full)
    fn set_volume(&mut self, handle: TrackHandle, volume: f32) -> Result<(), AudioError>;

    /// Whether a track is still audible
    fn is_playing(&self, handle: TrackHandle) -> bool;

    /// Per-frame housekeeping (drop finished tracks)
    fn update(&mut self);

    /// Stop every active track
    fn stop_all(&mut self);
}

/// Create the default audio backend for the platform
pub fn create_backend() -> Result<Box<dyn AudioBackend>, AudioError> {
    let mut backend = Box::new(RodioBackend::new());
    backend.initialize()?;
    Ok(backend)
}

/// Create the platform backend, degrading to the silent [`NullBackend`]
/// when no audio device is available (headless runs, CI)
pub fn create_backend_or_null() -> Box<dyn AudioBackend> {
    match create_backend() {
        Ok(backend) => backend,
        Err(e) => {
            log::warn!("Audio unavailable ({}), continuing silently", e);
            Box::new(NullBackend::new())
        }
    }
}
