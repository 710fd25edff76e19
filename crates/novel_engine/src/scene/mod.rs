//! Scripted scenes
//!
//! A scene is one playable unit: background, character roster, dialog box,
//! music cues, and the command list driving them. The sequencer steps the
//! command list; the runtime composes everything; the manager chains scenes
//! until a script names the exit sentinel.

pub mod character;
pub mod dialog;
pub mod manager;
pub mod runtime;
pub mod sequencer;

pub use character::Character;
pub use dialog::{DialogBox, DialogGeometry};
pub use manager::{SceneError, SceneManager};
pub use runtime::SceneRuntime;
pub use sequencer::{CommandContext, CommandSequencer, CursorState};
