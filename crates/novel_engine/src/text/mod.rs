//! Bitmap-font text pipeline
//!
//! Converts a TrueType font into a packed glyph atlas (`font_atlas`), wraps
//! and meshes strings against the atlas metrics (`layout`), and animates
//! incremental character reveal on top of the layout (`typewriter`).

pub mod font_atlas;
pub mod layout;
pub mod typewriter;

pub use font_atlas::{FontAtlas, FontError, GlyphInfo};
pub use layout::{GlyphQuad, TextVertex};
pub use typewriter::{Typewriter, TypewriterPhase};
