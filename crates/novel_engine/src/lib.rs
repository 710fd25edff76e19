//! # Novel Engine
//!
//! A 2D visual-novel presentation engine. Scenes are declarative scripts:
//! a background, character sprites with swappable expressions, typewriter
//! dialog rendered from a dynamically generated bitmap font, music cues
//! with fades, and character movement tweens.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use novel_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut audio = novel_engine::audio::backend::create_backend()?;
//!     let mut scenes = SceneManager::new("assets/scripts", config);
//!     scenes.initialize()?;
//!
//!     loop {
//!         let input = InputSnapshot::default(); // poll your window system here
//!         scenes.update(1.0 / 60.0, input, audio.as_mut());
//!         if scenes.should_exit() {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod audio;
pub mod config;
pub mod foundation;
pub mod input;
pub mod scene;
pub mod script;
pub mod text;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        audio::{backend::AudioBackend, music::MusicDirector},
        config::{Config, EngineConfig},
        foundation::{
            math::{Rect, Vec2},
            time::Timer,
        },
        input::InputSnapshot,
        scene::{SceneManager, SceneRuntime},
        script::{ScriptCommand, ScriptData},
        text::{FontAtlas, Typewriter},
    };
}
