//! Scene management
//!
//! Owns the current scene and the transition between scenes: scans the
//! scripts directory, loads the lexicographically first script, and follows
//! each scene's `next_scene` reference until one names the exit sentinel.

use crate::audio::backend::AudioBackend;
use crate::config::EngineConfig;
use crate::input::InputSnapshot;
use crate::scene::runtime::SceneRuntime;
use crate::script::{ScriptError, EXIT_SCENE};
use std::path::PathBuf;

/// Errors raised while initializing or switching scenes
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// Scripts directory does not exist
    #[error("Scripts directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// Scripts directory holds no scene scripts
    #[error("No scene scripts found in {0}")]
    NoScripts(PathBuf),

    /// Scene script failed to load
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Loads scenes from a directory and plays them in sequence
pub struct SceneManager {
    scripts_dir: PathBuf,
    config: EngineConfig,
    current: Option<SceneRuntime>,
    current_path: Option<PathBuf>,
    should_exit: bool,
}

impl SceneManager {
    /// Create a manager over a scripts directory
    pub fn new<P: Into<PathBuf>>(scripts_dir: P, config: EngineConfig) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            config,
            current: None,
            current_path: None,
            should_exit: false,
        }
    }

    /// Scan the scripts directory and load the first scene
    pub fn initialize(&mut self) -> Result<(), SceneError> {
        let first = self.find_first_script()?;
        log::info!("Starting with scene script {:?}", first);

        self.current = Some(SceneRuntime::load(&first, &self.config)?);
        self.current_path = Some(first);
        Ok(())
    }

    /// Lexicographically first `.ron` script in the directory
    fn find_first_script(&self) -> Result<PathBuf, SceneError> {
        if !self.scripts_dir.exists() {
            return Err(SceneError::MissingDirectory(self.scripts_dir.clone()));
        }

        let mut scripts: Vec<PathBuf> = std::fs::read_dir(&self.scripts_dir)
            .map_err(|_| SceneError::MissingDirectory(self.scripts_dir.clone()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |ext| ext == "ron"))
            .collect();

        scripts.sort();
        scripts
            .into_iter()
            .next()
            .ok_or_else(|| SceneError::NoScripts(self.scripts_dir.clone()))
    }

    /// Tick the current scene and follow scene transitions
    pub fn update(&mut self, delta_time: f32, input: InputSnapshot, audio: &mut dyn AudioBackend) {
        let Some(scene) = self.current.as_mut() else {
            return;
        };

        scene.update(delta_time, input, audio);

        if scene.is_initialized() && scene.is_complete() && !scene.is_command_in_progress() {
            self.advance_to_next_scene(audio);
        }
    }

    /// Load the scene referenced by the current one
    ///
    /// Returns whether a new scene was loaded. The exit sentinel (or a
    /// script that fails to load) stops the show instead.
    pub fn advance_to_next_scene(&mut self, audio: &mut dyn AudioBackend) -> bool {
        let Some(scene) = self.current.as_mut() else {
            return false;
        };

        let next = scene.next_scene().to_string();
        if next == EXIT_SCENE {
            log::info!("Scene requested exit");
            self.should_exit = true;
            return false;
        }

        scene.stop_music(audio);

        let path = self.scripts_dir.join(&next);
        match SceneRuntime::load(&path, &self.config) {
            Ok(next_scene) => {
                log::info!("Switched to scene script {:?}", path);
                self.current = Some(next_scene);
                self.current_path = Some(path);
                true
            }
            Err(e) => {
                log::error!("Failed to load next scene {:?}: {}", path, e);
                self.should_exit = true;
                false
            }
        }
    }

    /// Whether the show is over (exit sentinel reached or load failure)
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Currently playing scene
    pub fn current_scene(&self) -> Option<&SceneRuntime> {
        self.current.as_ref()
    }

    /// Path of the currently playing script
    pub fn current_script_path(&self) -> Option<&PathBuf> {
        self.current_path.as_ref()
    }
}
