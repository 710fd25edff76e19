//! Dialog box presentation
//!
//! Wraps the typewriter with the visible chrome: backdrop rectangle,
//! speaker name box sized to the measured name width, and the per-frame
//! quad geometry for both text runs. Geometry is a pure query re-derived
//! each frame from the revealed count.

use crate::config::DialogLayout;
use crate::foundation::math::{Rect, Vec2};
use crate::text::layout::{self, GlyphQuad};
use crate::text::{FontAtlas, Typewriter, TypewriterPhase};

/// Everything the renderer needs to draw the dialog box this frame
pub struct DialogGeometry {
    /// Dialog backdrop rectangle
    pub box_rect: Rect,
    /// Speaker name backdrop, present while a speaker is set
    pub name_rect: Option<Rect>,
    /// Quads for the speaker name text
    pub name_quads: Vec<GlyphQuad>,
    /// Quads for the revealed portion of the dialog text
    pub text_quads: Vec<GlyphQuad>,
}

/// Dialog box state: typewriter plus speaker and visibility
pub struct DialogBox {
    typewriter: Typewriter,
    layout: DialogLayout,
    speaker: String,
    name_width: f32,
    visible: bool,
}

impl DialogBox {
    /// Create a hidden dialog box
    pub fn new(layout: DialogLayout, typewriter: Typewriter) -> Self {
        Self {
            typewriter,
            layout,
            speaker: String::new(),
            name_width: 0.0,
            visible: false,
        }
    }

    /// Submit a new dialog line
    ///
    /// Returns whether the typewriter accepted it; the box becomes visible
    /// on acceptance.
    pub fn set_line(&mut self, text: &str, atlas: &FontAtlas) -> bool {
        let accepted = self
            .typewriter
            .set_line(text, atlas, self.layout.max_line_width);
        if accepted {
            self.visible = true;
        }
        accepted
    }

    /// Set the displayed speaker name; an empty name clears it
    pub fn set_speaker(&mut self, name: &str, atlas: &FontAtlas) {
        self.speaker = name.to_string();
        self.name_width = layout::measure_width(name, atlas) + self.layout.name_padding * 2.0;
    }

    /// Currently displayed speaker name
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    /// Advance the typewriter
    pub fn update(&mut self, delta_time: f32) {
        self.typewriter.tick(delta_time);
    }

    /// Force-finish the reveal animation
    pub fn complete(&mut self) {
        self.typewriter.complete();
    }

    /// Whether the reveal animation has finished
    pub fn is_animation_complete(&self) -> bool {
        self.typewriter.is_animation_complete()
    }

    /// Whether player advancement is permitted
    pub fn can_advance(&self) -> bool {
        self.typewriter.can_advance()
    }

    /// Current typewriter phase
    pub fn phase(&self) -> TypewriterPhase {
        self.typewriter.phase()
    }

    /// Wrapped rows of the current line
    pub fn wrapped_lines(&self) -> &[String] {
        self.typewriter.wrapped_lines()
    }

    /// Switch between normal and fast reveal speed
    pub fn set_fast_mode(&mut self, fast: bool) {
        self.typewriter.set_fast_mode(fast);
    }

    /// Hide the box and clear all text
    pub fn clear(&mut self) {
        self.typewriter.clear();
        self.speaker.clear();
        self.name_width = 0.0;
        self.visible = false;
    }

    /// Build this frame's geometry
    ///
    /// Returns `None` while the box is hidden or the atlas cannot be
    /// rendered from (the render pass skips the dialog layer entirely).
    pub fn geometry(&self, atlas: &FontAtlas) -> Option<DialogGeometry> {
        if !self.visible || atlas.is_empty() {
            return None;
        }

        let (name_rect, name_quads) = if self.speaker.is_empty() {
            (None, Vec::new())
        } else {
            let name_pos = self.layout.name_position();
            let rect = Rect::new(
                name_pos.x,
                name_pos.y,
                self.name_width,
                self.layout.name_height,
            );

            // Baseline placed so the name sits vertically centered in its box
            let baseline = Vec2::new(
                name_pos.x + self.layout.name_padding,
                name_pos.y + (self.layout.name_height + atlas.font_size()) / 2.0,
            );
            let quads = layout::layout_reveal(
                &[self.speaker.clone()],
                self.speaker.chars().count(),
                atlas,
                baseline,
                self.layout.line_height,
            );
            (Some(rect), quads)
        };

        let text_quads = layout::layout_reveal(
            self.typewriter.wrapped_lines(),
            self.typewriter.revealed_count(),
            atlas,
            self.layout.text_origin(),
            self.layout.line_height,
        );

        Some(DialogGeometry {
            box_rect: self.layout.box_rect(),
            name_rect,
            name_quads,
            text_quads,
        })
    }
}
