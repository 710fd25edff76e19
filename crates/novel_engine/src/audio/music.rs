//! Background music direction
//!
//! Keeps the scene's named-track table and layers volume fades over the
//! backend's raw volume setter. Fades are linear between the volume at
//! fade start and the target; a fade that reaches zero stops the track.

use crate::audio::backend::{AudioBackend, TrackHandle};
use crate::audio::AudioError;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A track registered from the scene script
#[derive(Debug, Clone)]
struct RegisteredTrack {
    path: PathBuf,
}

/// Fade bookkeeping for the active track
#[derive(Debug)]
struct ActiveTrack {
    name: String,
    handle: TrackHandle,
    current_volume: f32,
    fade_from: f32,
    target_volume: f32,
    fade_time: f32,
    fade_timer: f32,
    fading: bool,
}

/// A replaced track fading down to silence before being stopped
#[derive(Debug)]
struct FadingOut {
    handle: TrackHandle,
    from_volume: f32,
    fade_time: f32,
    fade_timer: f32,
}

/// Music system managing named tracks and fades for one scene
pub struct MusicDirector {
    tracks: HashMap<String, RegisteredTrack>,
    current: Option<ActiveTrack>,
    fading_out: Option<FadingOut>,
}

impl MusicDirector {
    /// Create an empty music director
    pub fn new() -> Self {
        Self {
            tracks: HashMap::new(),
            current: None,
            fading_out: None,
        }
    }

    /// Register a named track
    ///
    /// Looping is decided per play call, since each music cue carries its
    /// own loop flag. Unreadable files are logged and not registered, so
    /// later `play` calls for them are ignored like any other unknown name.
    pub fn register_track<P: AsRef<Path>>(&mut self, name: &str, path: P) {
        let path_ref = path.as_ref();
        if let Err(e) = File::open(path_ref) {
            log::warn!("Failed to load music track {:?}: {}", path_ref, e);
            return;
        }

        self.tracks.insert(
            name.to_string(),
            RegisteredTrack {
                path: path_ref.to_path_buf(),
            },
        );
    }

    /// Whether a track name is registered
    pub fn has_track(&self, name: &str) -> bool {
        self.tracks.contains_key(name)
    }

    /// Name of the currently active track, if any
    pub fn current_track(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.name.as_str())
    }

    /// Start a registered track, fading the previous one out
    ///
    /// `looped` overrides the registered loop flag, since the music cue in
    /// the script carries its own. Unknown names are warned about and
    /// ignored; the caller treats the cue as satisfied either way.
    pub fn play(
        &mut self,
        name: &str,
        volume: f32,
        fade_in: f32,
        fade_out: f32,
        looped: bool,
        backend: &mut dyn AudioBackend,
    ) -> Result<(), AudioError> {
        let Some(track) = self.tracks.get(name).cloned() else {
            log::warn!("Music command references unknown track '{}'", name);
            return Ok(());
        };

        self.retire_current(fade_out, backend)?;

        let handle = backend.play_from_path(&track.path, looped)?;

        if fade_in > 0.0 {
            backend.set_volume(handle, 0.0)?;
            self.current = Some(ActiveTrack {
                name: name.to_string(),
                handle,
                current_volume: 0.0,
                fade_from: 0.0,
                target_volume: volume,
                fade_time: fade_in,
                fade_timer: 0.0,
                fading: true,
            });
        } else {
            backend.set_volume(handle, volume)?;
            self.current = Some(ActiveTrack {
                name: name.to_string(),
                handle,
                current_volume: volume,
                fade_from: volume,
                target_volume: volume,
                fade_time: 0.0,
                fade_timer: 0.0,
                fading: false,
            });
        }

        log::info!("Playing music track '{}' at volume {}", name, volume);
        Ok(())
    }

    /// Stop the active track, optionally fading it out first
    pub fn stop(&mut self, fade_out: f32, backend: &mut dyn AudioBackend) -> Result<(), AudioError> {
        if let Some(current) = self.current.as_mut() {
            if fade_out > 0.0 {
                current.fade_from = current.current_volume;
                current.target_volume = 0.0;
                current.fade_time = fade_out;
                current.fade_timer = 0.0;
                current.fading = true;
            } else {
                backend.stop(current.handle)?;
                self.current = None;
            }
        }
        Ok(())
    }

    /// Advance fade interpolation (call once per frame)
    pub fn update(&mut self, delta_time: f32, backend: &mut dyn AudioBackend) {
        if let Some(out) = self.fading_out.as_mut() {
            out.fade_timer += delta_time;
            let progress = out.fade_timer / out.fade_time;
            if progress >= 1.0 {
                let _ = backend.stop(out.handle);
                self.fading_out = None;
            } else {
                let _ = backend.set_volume(out.handle, out.from_volume * (1.0 - progress));
            }
        }

        let Some(current) = self.current.as_mut() else {
            return;
        };
        if !current.fading {
            return;
        }

        current.fade_timer += delta_time;
        let progress = current.fade_timer / current.fade_time;
        if progress >= 1.0 {
            current.fading = false;
            current.current_volume = current.target_volume;
            if current.target_volume == 0.0 {
                let _ = backend.stop(current.handle);
                self.current = None;
            } else {
                let _ = backend.set_volume(current.handle, current.target_volume);
            }
        } else {
            current.current_volume =
                current.fade_from + (current.target_volume - current.fade_from) * progress;
            let _ = backend.set_volume(current.handle, current.current_volume);
        }
    }

    /// Fade out (or cut) whatever is currently playing to make room for a
    /// replacement track
    fn retire_current(
        &mut self,
        fade_out: f32,
        backend: &mut dyn AudioBackend,
    ) -> Result<(), AudioError> {
        let Some(current) = self.current.take() else {
            return Ok(());
        };

        if fade_out > 0.0 {
            // A still-fading previous track is cut short rather than stacked
            if let Some(out) = self.fading_out.take() {
                backend.stop(out.handle)?;
            }
            self.fading_out = Some(FadingOut {
                handle: current.handle,
                from_volume: current.current_volume,
                fade_time: fade_out,
                fade_timer: 0.0,
            });
        } else {
            backend.stop(current.handle)?;
        }
        Ok(())
    }
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self::new()
    }
}
