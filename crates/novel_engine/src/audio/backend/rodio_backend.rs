//! Rodio audio backend implementation
//!
//! Uses the Rodio library for cross-platform audio playback. Rodio is pure
//! Rust and supports WAV, OGG Vorbis, and FLAC formats. Each playing track
//! gets its own sink, addressed by a [`TrackHandle`].

use super::{AudioBackend, TrackHandle};
use crate::audio::AudioError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _output_stream: Option<OutputStream>,
    /// Output stream handle for creating sinks
    stream_handle: Option<OutputStreamHandle>,
    /// Active track sinks
    active_tracks: HashMap<TrackHandle, Sink>,
    /// Next track ID for handle generation
    next_id: u32,
    /// Initialization state
    initialized: bool,
}

impl RodioBackend {
    /// Create a new, uninitialized Rodio backend
    pub fn new() -> Self {
        Self {
            _output_stream: None,
            stream_handle: None,
            active_tracks: HashMap::new(),
            next_id: 0,
            initialized: false,
        }
    }

    /// Open the default audio output device
    pub fn initialize(&mut self) -> Result<(), AudioError> {
        if self.initialized {
            return Ok(());
        }

        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| {
            AudioError::BackendInitFailed(format!("Failed to create audio output: {}", e))
        })?;

        self._output_stream = Some(stream);
        self.stream_handle = Some(stream_handle);
        self.initialized = true;

        log::info!("Rodio audio backend initialized");
        Ok(())
    }

    /// Release the output device and stop everything
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.stop_all();
        self.stream_handle = None;
        self._output_stream = None;
        self.initialized = false;

        log::info!("Rodio audio backend shutdown");
    }

    fn next_handle(&mut self) -> TrackHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        TrackHandle::new(id)
    }
}

impl AudioBackend for RodioBackend {
    fn play_from_path(&mut self, path: &Path, looped: bool) -> Result<TrackHandle, AudioError> {
        let stream_handle = self
            .stream_handle
            .as_ref()
            .ok_or(AudioError::BackendNotInitialized)?;

        let sink = Sink::try_new(stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;

        let file = File::open(path)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to open audio file: {}", e)))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))?;

        if looped {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        let handle = self.next_handle();
        self.active_tracks.insert(handle, sink);

        log::debug!("Playing {:?} as {:?} (loop: {})", path, handle, looped);
        Ok(handle)
    }

    fn stop(&mut self, handle: TrackHandle) -> Result<(), AudioError> {
        if let Some(sink) = self.active_tracks.remove(&handle) {
            sink.stop();
        }
        Ok(())
    }

    fn set_volume(&mut self, handle: TrackHandle, volume: f32) -> Result<(), AudioError> {
        let sink = self
            .active_tracks
            .get(&handle)
            .ok_or(AudioError::InvalidHandle)?;
        sink.set_volume(volume);
        Ok(())
    }

    fn is_playing(&self, handle: TrackHandle) -> bool {
        self.active_tracks
            .get(&handle)
            .map(|sink| !sink.is_paused() && !sink.empty())
            .unwrap_or(false)
    }

    fn update(&mut self) {
        self.active_tracks.retain(|_handle, sink| !sink.empty());
    }

    fn stop_all(&mut self) {
        for (_handle, sink) in self.active_tracks.drain() {
            sink.stop();
        }
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}
