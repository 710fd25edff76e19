//! Silent audio backend
//!
//! Accepts every call and plays nothing. Used for headless runs and for
//! deterministic tests of the music and sequencing layers.

use super::{AudioBackend, TrackHandle};
use crate::audio::AudioError;
use std::collections::HashMap;
use std::path::Path;

/// Backend that tracks state without producing sound
pub struct NullBackend {
    /// Volume per active (pretend-playing) track
    active_tracks: HashMap<TrackHandle, f32>,
    next_id: u32,
    total_plays: u32,
}

impl NullBackend {
    /// Create a new silent backend
    pub fn new() -> Self {
        Self {
            active_tracks: HashMap::new(),
            next_id: 0,
            total_plays: 0,
        }
    }

    /// Number of tracks currently "playing"
    pub fn active_count(&self) -> usize {
        self.active_tracks.len()
    }

    /// Total `play_from_path` calls since creation
    pub fn total_plays(&self) -> u32 {
        self.total_plays
    }

    /// Last volume set for a track, if active
    pub fn volume_of(&self, handle: TrackHandle) -> Option<f32> {
        self.active_tracks.get(&handle).copied()
    }
}

impl AudioBackend for NullBackend {
    fn play_from_path(&mut self, path: &Path, looped: bool) -> Result<TrackHandle, AudioError> {
        let handle = TrackHandle::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.total_plays += 1;
        self.active_tracks.insert(handle, 1.0);
        log::debug!("NullBackend: play {:?} (loop: {})", path, looped);
        Ok(handle)
    }

    fn stop(&mut self, handle: TrackHandle) -> Result<(), AudioError> {
        self.active_tracks.remove(&handle);
        Ok(())
    }

    fn set_volume(&mut self, handle: TrackHandle, volume: f32) -> Result<(), AudioError> {
        match self.active_tracks.get_mut(&handle) {
            Some(v) => {
                *v = volume;
                Ok(())
            }
            None => Err(AudioError::InvalidHandle),
        }
    }

    fn is_playing(&self, handle: TrackHandle) -> bool {
        self.active_tracks.contains_key(&handle)
    }

    fn update(&mut self) {}

    fn stop_all(&mut self) {
        self.active_tracks.clear();
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_stop_cycle() {
        let mut backend = NullBackend::new();
        let handle = backend.play_from_path(Path::new("a.ogg"), false).unwrap();
        assert!(backend.is_playing(handle));
        assert_eq!(backend.active_count(), 1);

        backend.set_volume(handle, 0.5).unwrap();
        assert_eq!(backend.volume_of(handle), Some(0.5));

        backend.stop(handle).unwrap();
        assert!(!backend.is_playing(handle));
        assert_eq!(backend.active_count(), 0);
    }

    #[test]
    fn test_set_volume_on_stopped_track() {
        let mut backend = NullBackend::new();
        let result = backend.set_volume(TrackHandle::new(7), 1.0);
        assert!(matches!(result, Err(AudioError::InvalidHandle)));
    }
}
