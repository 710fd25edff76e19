//! Headless rehearsal player
//!
//! Plays a scripts directory from start to exit without a window: dialog is
//! auto-advanced as soon as each line finishes its cooldown, and every line
//! is logged. Useful for proofing scene scripts — wrapping, command order,
//! music cues, and scene chaining all run exactly as in the real player.

use novel_engine::audio::backend::create_backend_or_null;
use novel_engine::config::{Config, EngineConfig};
use novel_engine::input::InputSnapshot;
use novel_engine::scene::SceneManager;

/// Fixed rehearsal timestep (60 updates per simulated second)
const STEP: f32 = 1.0 / 60.0;

/// Hard cap on rehearsal frames so a malformed script cannot spin forever
const MAX_FRAMES: u64 = 1_000_000;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match EngineConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let mut audio = create_backend_or_null();
    let mut scenes = SceneManager::new(config.scripts_dir.clone(), config);

    if let Err(e) = scenes.initialize() {
        log::error!("Failed to initialize scenes: {}", e);
        std::process::exit(1);
    }

    let mut last_line = String::new();
    let mut advance_down = false;

    for frame in 0..MAX_FRAMES {
        // Press advance for exactly one frame whenever the dialog is ready
        let press = scenes
            .current_scene()
            .map_or(false, |scene| scene.dialog().can_advance() && !advance_down);
        advance_down = press;

        let input = if press {
            InputSnapshot::advance()
        } else {
            InputSnapshot::idle()
        };

        scenes.update(STEP, input, audio.as_mut());

        if let Some(scene) = scenes.current_scene() {
            let dialog = scene.dialog();
            if dialog.is_animation_complete() && !dialog.wrapped_lines().is_empty() {
                let text = dialog.wrapped_lines().join(" ");
                let line = if dialog.speaker().is_empty() {
                    text
                } else {
                    format!("{}: {}", dialog.speaker(), text)
                };
                if line != last_line {
                    log::info!("{}", line);
                    last_line = line;
                }
            }
        }

        if scenes.should_exit() {
            log::info!("Rehearsal finished after {} frames", frame + 1);
            return;
        }
    }

    log::error!("Rehearsal frame cap reached; script may never terminate");
    std::process::exit(2);
}
