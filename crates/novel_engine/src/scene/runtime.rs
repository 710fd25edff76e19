//! Scene runtime
//!
//! Composes one playable scene from its script: glyph atlas, background,
//! characters, dialog box, music cues, and the command sequencer. The
//! runtime is driven by one `update` per frame; render accessors are pure
//! queries evaluated after the tick.

use crate::assets::ImageData;
use crate::audio::backend::AudioBackend;
use crate::audio::MusicDirector;
use crate::config::EngineConfig;
use crate::foundation::math::Vec2;
use crate::input::InputSnapshot;
use crate::scene::character::Character;
use crate::scene::dialog::{DialogBox, DialogGeometry};
use crate::scene::sequencer::{CommandContext, CommandSequencer};
use crate::script::{ScriptData, ScriptError};
use crate::text::font_atlas::DEFAULT_RANGES;
use crate::text::{FontAtlas, Typewriter};
use std::path::Path;
use std::sync::Arc;

/// Placeholder used when the background image cannot be loaded
const FALLBACK_BACKGROUND_SIZE: (u32, u32) = (1920, 1080);
const FALLBACK_BACKGROUND_COLOR: [u8; 4] = [50, 50, 50, 255];

/// One playable scripted scene
pub struct SceneRuntime {
    data: ScriptData,
    atlas: Arc<FontAtlas>,
    background: ImageData,
    characters: Vec<Character>,
    dialog: DialogBox,
    music: MusicDirector,
    sequencer: CommandSequencer,
    initialized: bool,
}

impl SceneRuntime {
    /// Load a scene from a script file
    ///
    /// Script errors abort the load; font and asset failures degrade
    /// (fallback font, placeholder images) and never abort.
    pub fn load<P: AsRef<Path>>(script_path: P, config: &EngineConfig) -> Result<Self, ScriptError> {
        let data = ScriptData::load_from_file(script_path)?;

        let atlas = Arc::new(build_scene_font(&data, config));

        let background = ImageData::from_file(&data.background).unwrap_or_else(|e| {
            log::warn!("Background load failed ({}), using placeholder", e);
            ImageData::solid_color(
                FALLBACK_BACKGROUND_SIZE.0,
                FALLBACK_BACKGROUND_SIZE.1,
                FALLBACK_BACKGROUND_COLOR,
            )
        });

        let mut characters = Vec::with_capacity(data.characters.len());
        for def in &data.characters {
            let mut character = Character::new(def.name.clone());
            for (expression, sprite_path) in &def.sprites {
                match ImageData::from_file(sprite_path) {
                    Ok(image) => character.add_expression(expression.clone(), image),
                    Err(e) => log::warn!(
                        "Sprite load failed for '{}' expression '{}': {}",
                        def.name,
                        expression,
                        e
                    ),
                }
            }
            character.set_position(Vec2::from(def.initial_position));
            character.set_expression("default");
            characters.push(character);
        }

        let mut music = MusicDirector::new();
        for (name, track) in &data.music {
            music.register_track(name, &track.path);
        }

        let dialog = DialogBox::new(
            config.dialog.clone(),
            Typewriter::with_timing(
                config.normal_char_delay,
                config.fast_char_delay,
                config.advance_cooldown,
            ),
        );

        Ok(Self {
            data,
            atlas,
            background,
            characters,
            dialog,
            music,
            sequencer: CommandSequencer::new(),
            initialized: false,
        })
    }

    /// Advance the scene by one frame
    ///
    /// Order within the tick matters: dialog and music animate first, the
    /// first frame auto-starts the command list, a running command gets its
    /// elapsed time, and player input is applied last.
    pub fn update(&mut self, delta_time: f32, input: InputSnapshot, audio: &mut dyn AudioBackend) {
        self.dialog.update(delta_time);
        self.music.update(delta_time, audio);

        if !self.initialized {
            self.initialized = true;
            let mut ctx = CommandContext {
                dialog: &mut self.dialog,
                characters: &mut self.characters,
                music: &mut self.music,
                audio,
                atlas: &self.atlas,
            };
            self.sequencer.start(&self.data.script, input, &mut ctx);
            return;
        }

        let mut ctx = CommandContext {
            dialog: &mut self.dialog,
            characters: &mut self.characters,
            music: &mut self.music,
            audio,
            atlas: &self.atlas,
        };
        self.sequencer
            .tick(delta_time, &self.data.script, input, &mut ctx);
        self.sequencer
            .advance_requested(&self.data.script, input, &mut ctx);
    }

    /// Whether the cursor has run past the final command
    pub fn is_complete(&self) -> bool {
        self.sequencer.is_finished(&self.data.script)
    }

    /// Whether a time-extended command is still running
    pub fn is_command_in_progress(&self) -> bool {
        self.sequencer.is_command_in_progress()
    }

    /// Whether the first update has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Script reference of the scene that follows this one
    pub fn next_scene(&self) -> &str {
        &self.data.next_scene
    }

    /// The loaded script
    pub fn script(&self) -> &ScriptData {
        &self.data
    }

    /// Stop this scene's music (scene transitions cut playback)
    pub fn stop_music(&mut self, audio: &mut dyn AudioBackend) {
        if let Err(e) = self.music.stop(0.0, audio) {
            log::warn!("Failed to stop music: {}", e);
        }
    }

    /// Switch typewriter speed
    pub fn set_fast_mode(&mut self, fast: bool) {
        self.dialog.set_fast_mode(fast);
    }

    /// Shared glyph atlas for this scene
    pub fn atlas(&self) -> Arc<FontAtlas> {
        Arc::clone(&self.atlas)
    }

    /// Background image (placeholder if the real one failed to load)
    pub fn background(&self) -> &ImageData {
        &self.background
    }

    /// Character roster in script order
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Dialog box state
    pub fn dialog(&self) -> &DialogBox {
        &self.dialog
    }

    /// This frame's dialog geometry; `None` when nothing should be drawn
    pub fn dialog_geometry(&self) -> Option<DialogGeometry> {
        self.dialog.geometry(&self.atlas)
    }
}

/// Build the scene's font, falling back to the default font, then to an
/// empty atlas (no text rendering) when both fail
fn build_scene_font(data: &ScriptData, config: &EngineConfig) -> FontAtlas {
    match FontAtlas::build_from_file(&data.font, config.font_size, &DEFAULT_RANGES) {
        Ok(atlas) => atlas,
        Err(e) => {
            log::error!(
                "Failed to build font {:?} ({}), falling back to {:?}",
                data.font,
                e,
                config.fallback_font
            );
            match FontAtlas::build_from_file(&config.fallback_font, config.font_size, &DEFAULT_RANGES)
            {
                Ok(atlas) => atlas,
                Err(e) => {
                    log::error!("Fallback font failed too ({}), text rendering disabled", e);
                    FontAtlas::empty()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::backend::NullBackend;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_script(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_zero_command_scene_completes_immediately() {
        let path = write_script(
            "novel_engine_rt_empty.ron",
            r#"(scene_name: "empty", script: [])"#,
        );
        let config = EngineConfig::default();
        let mut scene = SceneRuntime::load(&path, &config).unwrap();
        let mut audio = NullBackend::new();

        assert!(!scene.is_complete());
        scene.update(0.016, InputSnapshot::idle(), &mut audio);
        assert!(scene.is_initialized());
        assert!(scene.is_complete());
        assert!(!scene.is_command_in_progress());
    }

    #[test]
    fn test_missing_script_propagates_error() {
        let config = EngineConfig::default();
        assert!(SceneRuntime::load("no/such/scene.ron", &config).is_err());
    }

    #[test]
    fn test_missing_assets_degrade_to_placeholders() {
        let path = write_script(
            "novel_engine_rt_assets.ron",
            r#"(
                scene_name: "degraded",
                background: "missing/bg.png",
                font: "missing/font.ttf",
                characters: [
                    (name: "Mira", sprites: {"default": "missing/mira.png"}),
                ],
                script: [
                    Dialog(character: "Mira", text: "Hello."),
                ],
            )"#,
        );
        let mut config = EngineConfig::default();
        config.fallback_font = PathBuf::from("also/missing.ttf");

        let mut scene = SceneRuntime::load(&path, &config).unwrap();
        let mut audio = NullBackend::new();

        // Placeholder background, sprite-less character, empty atlas
        assert_eq!(scene.background().width, 1920);
        assert!(scene.characters()[0].sprite().is_none());

        scene.update(0.016, InputSnapshot::idle(), &mut audio);

        // Dialog ran, but with an empty atlas nothing is drawable
        assert!(scene.dialog_geometry().is_none());
    }

    #[test]
    fn test_dialog_and_advance_flow() {
        let path = write_script(
            "novel_engine_rt_flow.ron",
            r#"(
                scene_name: "flow",
                script: [
                    Dialog(text: "First."),
                    Dialog(text: "Second."),
                ],
                next_scene: "exit",
            )"#,
        );
        let config = EngineConfig::default();
        let mut scene = SceneRuntime::load(&path, &config).unwrap();
        let mut audio = NullBackend::new();

        scene.update(0.016, InputSnapshot::idle(), &mut audio);
        assert!(!scene.is_complete());

        // Let the first line finish typing and cool down, then advance twice
        for _ in 0..100 {
            scene.update(0.016, InputSnapshot::idle(), &mut audio);
        }
        scene.update(0.016, InputSnapshot::advance(), &mut audio);
        assert!(!scene.is_complete());

        scene.update(0.016, InputSnapshot::idle(), &mut audio);
        for _ in 0..100 {
            scene.update(0.016, InputSnapshot::idle(), &mut audio);
        }
        scene.update(0.016, InputSnapshot::advance(), &mut audio);
        assert!(scene.is_complete());
        assert_eq!(scene.next_scene(), "exit");
    }
}
