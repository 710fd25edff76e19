//! Scene script loading
//!
//! A scene is described by a declarative RON document: background, font,
//! character roster, music track table, and the ordered command list the
//! sequencer steps through. Everything here is immutable after load.
//!
//! # Example script
//!
//! ```ron
//! (
//!     scene_name: "prologue",
//!     background: "assets/backgrounds/street.png",
//!     characters: [
//!         (
//!             name: "Mira",
//!             sprites: { "default": "assets/sprites/mira.png" },
//!             initial_position: (320.0, 540.0),
//!         ),
//!     ],
//!     music: { "theme": (path: "assets/music/theme.ogg", loop: true) },
//!     script: [
//!         Music(track: "theme", fade_in: 1.5),
//!         Dialog(character: "Mira", text: "It's been a while."),
//!         Move(character: "Mira", position: (640.0, 540.0), duration: 2.0),
//!     ],
//!     next_scene: "scene_02.ron",
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Sentinel `next_scene` value signalling program exit
pub const EXIT_SCENE: &str = "exit";

/// Errors raised while loading a scene script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Script file could not be read
    #[error("Failed to read script {path}: {source}")]
    Io {
        /// Path of the script file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Script file is not valid RON or misses required fields
    #[error("Failed to parse script {path}: {message}")]
    Parse {
        /// Path of the script file
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },
}

/// One command in a scene's ordered script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScriptCommand {
    /// Show a dialog line, optionally switching the speaker's expression
    Dialog {
        /// Speaker name; empty clears the displayed name
        #[serde(default)]
        character: String,
        /// Dialog text revealed by the typewriter
        text: String,
        /// Expression to switch the speaker to; empty leaves it unchanged
        #[serde(default)]
        expression: String,
    },

    /// Move a character to a target position
    Move {
        /// Character to move
        character: String,
        /// Target position in pixels
        position: [f32; 2],
        /// Tween duration in seconds; zero snaps instantly
        #[serde(default)]
        duration: f32,
        /// Interpolate when true, teleport when false
        #[serde(default = "default_true")]
        smooth: bool,
    },

    /// Start, change, or stop background music
    Music {
        /// Track name from the scene's music table; empty stops playback
        #[serde(default)]
        track: String,
        /// Playback volume, 0.0 to 1.0
        #[serde(default = "default_volume")]
        volume: f32,
        /// Fade-in duration in seconds
        #[serde(default)]
        fade_in: f32,
        /// Fade-out duration for the replaced (or stopped) track
        #[serde(default)]
        fade_out: f32,
        /// Loop the track
        #[serde(rename = "loop", default)]
        looped: bool,
    },
}

/// Character roster entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    /// Identity key referenced by Dialog and Move commands
    pub name: String,

    /// Expression name to sprite image path
    #[serde(default)]
    pub sprites: BTreeMap<String, PathBuf>,

    /// Starting position in pixels
    #[serde(default = "default_position")]
    pub initial_position: [f32; 2],
}

/// Music track table entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicTrackDef {
    /// Path to the audio file
    pub path: PathBuf,

    /// Loop the track when played
    #[serde(rename = "loop", default)]
    pub looped: bool,
}

/// Immutable description of one scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptData {
    /// Display name of the scene
    pub scene_name: String,

    /// Background image path
    #[serde(default = "default_background")]
    pub background: PathBuf,

    /// Font file used for this scene's dialog
    #[serde(default = "default_font")]
    pub font: PathBuf,

    /// Character roster
    #[serde(default)]
    pub characters: Vec<CharacterDef>,

    /// Named music tracks available to Music commands
    #[serde(default)]
    pub music: BTreeMap<String, MusicTrackDef>,

    /// Ordered command list
    #[serde(default)]
    pub script: Vec<ScriptCommand>,

    /// Script file of the following scene, or [`EXIT_SCENE`]
    #[serde(default = "default_next_scene")]
    pub next_scene: String,
}

impl ScriptData {
    /// Load and parse a scene script
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path_ref = path.as_ref();
        let contents = std::fs::read_to_string(path_ref).map_err(|source| ScriptError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let data: Self = ron::from_str(&contents).map_err(|e| ScriptError::Parse {
            path: path_ref.to_path_buf(),
            message: e.to_string(),
        })?;

        log::info!(
            "Loaded script {:?}: scene '{}', {} commands, {} characters",
            path_ref,
            data.scene_name,
            data.script.len(),
            data.characters.len()
        );

        Ok(data)
    }

    /// Whether this scene's `next_scene` is the exit sentinel
    pub fn exits_after(&self) -> bool {
        self.next_scene == EXIT_SCENE
    }
}

fn default_background() -> PathBuf {
    PathBuf::from("assets/default.png")
}

fn default_font() -> PathBuf {
    PathBuf::from("assets/fonts/default.ttf")
}

fn default_position() -> [f32; 2] {
    [960.0, 540.0]
}

fn default_next_scene() -> String {
    EXIT_SCENE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_script_defaults() {
        let data: ScriptData = ron::from_str(r#"(scene_name: "empty")"#).unwrap();
        assert_eq!(data.scene_name, "empty");
        assert_eq!(data.background, PathBuf::from("assets/default.png"));
        assert_eq!(data.font, PathBuf::from("assets/fonts/default.ttf"));
        assert!(data.script.is_empty());
        assert!(data.exits_after());
    }

    #[test]
    fn test_command_parsing() {
        let src = r#"(
            scene_name: "demo",
            characters: [
                (name: "Mira", sprites: {"default": "mira.png"}),
            ],
            music: {"theme": (path: "theme.ogg", loop: true)},
            script: [
                Music(track: "theme", fade_in: 1.5),
                Dialog(character: "Mira", text: "Hello.", expression: "smile"),
                Move(character: "Mira", position: (640.0, 540.0), duration: 2.0),
                Dialog(text: "A narrator speaks."),
            ],
            next_scene: "scene_02.ron",
        )"#;
        let data: ScriptData = ron::from_str(src).unwrap();

        assert_eq!(data.script.len(), 4);
        assert_eq!(data.characters[0].initial_position, [960.0, 540.0]);
        assert!(data.music["theme"].looped);
        assert!(!data.exits_after());

        match &data.script[0] {
            ScriptCommand::Music { track, volume, fade_in, looped, .. } => {
                assert_eq!(track, "theme");
                assert_eq!(*volume, 1.0);
                assert_eq!(*fade_in, 1.5);
                assert!(!*looped);
            }
            other => panic!("expected Music, got {:?}", other),
        }

        match &data.script[2] {
            ScriptCommand::Move { position, duration, smooth, .. } => {
                assert_eq!(*position, [640.0, 540.0]);
                assert_eq!(*duration, 2.0);
                assert!(*smooth);
            }
            other => panic!("expected Move, got {:?}", other),
        }

        match &data.script[3] {
            ScriptCommand::Dialog { character, .. } => assert!(character.is_empty()),
            other => panic!("expected Dialog, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ScriptData::load_from_file("missing/scene.ron");
        assert!(matches!(result, Err(ScriptError::Io { .. })));
    }
}
