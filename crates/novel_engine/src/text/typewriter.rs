//! Typewriter reveal animation
//!
//! Owns the reveal timing for one dialog line: characters appear one at a
//! time at a configurable rate, and a short cooldown after the last
//! character gates player advancement so rapid input cannot double-advance
//! past a line the instant it finishes typing.

use super::font_atlas::FontAtlas;
use super::layout;

/// Seconds per character at normal speed
pub const NORMAL_CHAR_DELAY: f32 = 0.05;
/// Seconds per character in fast mode
pub const FAST_CHAR_DELAY: f32 = 0.01;
/// Seconds after full reveal before advancement unlocks
pub const DEFAULT_ADVANCE_COOLDOWN: f32 = 0.2;

/// Longest accepted dialog line, in codepoints
const MAX_LINE_CODEPOINTS: usize = 1000;

/// Observable typewriter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    /// No text set
    Idle,
    /// Characters are being revealed
    Animating,
    /// Fully revealed, advance cooldown still running
    Cooling,
    /// Fully revealed and cooldown elapsed; advancement permitted
    Ready,
}

/// Incremental text reveal state machine
pub struct Typewriter {
    full_text: Vec<char>,
    revealed: usize,
    wrapped: Vec<String>,
    animating: bool,
    normal_delay: f32,
    fast_delay: f32,
    char_delay: f32,
    time_since_last_char: f32,
    advance_cooldown: f32,
    cooldown_elapsed: f32,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Typewriter {
    /// Create a typewriter with the default timing constants
    pub fn new() -> Self {
        Self::with_timing(NORMAL_CHAR_DELAY, FAST_CHAR_DELAY, DEFAULT_ADVANCE_COOLDOWN)
    }

    /// Create a typewriter with explicit timing
    pub fn with_timing(normal_delay: f32, fast_delay: f32, advance_cooldown: f32) -> Self {
        Self {
            full_text: Vec::new(),
            revealed: 0,
            wrapped: Vec::new(),
            animating: false,
            normal_delay,
            fast_delay,
            char_delay: normal_delay,
            time_since_last_char: 0.0,
            advance_cooldown,
            cooldown_elapsed: 0.0,
        }
    }

    /// Begin revealing a new line
    ///
    /// The submission is validated first: empty text, control characters
    /// other than `\n`, or over-length text are rejected and the previous
    /// state is left untouched. Returns whether the line was accepted.
    pub fn set_line(&mut self, text: &str, atlas: &FontAtlas, max_width: f32) -> bool {
        if !validate_line(text) {
            log::debug!("Rejected dialog line ({} bytes)", text.len());
            return false;
        }

        self.full_text = text.chars().collect();
        self.wrapped = layout::wrap_text(text, atlas, max_width);
        self.revealed = 0;
        self.time_since_last_char = 0.0;
        self.cooldown_elapsed = 0.0;
        self.animating = true;
        true
    }

    /// Clear all text and return to `Idle`
    pub fn clear(&mut self) {
        self.full_text.clear();
        self.wrapped.clear();
        self.revealed = 0;
        self.animating = false;
        self.time_since_last_char = 0.0;
        self.cooldown_elapsed = 0.0;
    }

    /// Advance the animation by `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32) {
        if !self.animating {
            if self.cooldown_elapsed < self.advance_cooldown {
                self.cooldown_elapsed += delta_time;
            }
            return;
        }

        self.time_since_last_char += delta_time;
        if self.time_since_last_char >= self.char_delay {
            self.time_since_last_char = 0.0;

            if self.revealed < self.full_text.len() {
                self.revealed += 1;
            }
            if self.revealed >= self.full_text.len() {
                self.animating = false;
                self.cooldown_elapsed = 0.0;
            }
        }
    }

    /// Jump straight to full reveal and restart the advance cooldown
    pub fn complete(&mut self) {
        if self.animating {
            self.revealed = self.full_text.len();
            self.animating = false;
            self.cooldown_elapsed = 0.0;
        }
    }

    /// Whether the reveal animation has finished (or no text is set)
    pub fn is_animation_complete(&self) -> bool {
        !self.animating
    }

    /// Whether player advancement is permitted
    pub fn can_advance(&self) -> bool {
        !self.animating && self.cooldown_elapsed >= self.advance_cooldown
    }

    /// Current phase of the state machine
    pub fn phase(&self) -> TypewriterPhase {
        if self.full_text.is_empty() {
            TypewriterPhase::Idle
        } else if self.animating {
            TypewriterPhase::Animating
        } else if self.cooldown_elapsed < self.advance_cooldown {
            TypewriterPhase::Cooling
        } else {
            TypewriterPhase::Ready
        }
    }

    /// Switch between normal and fast reveal speed
    pub fn set_fast_mode(&mut self, fast: bool) {
        self.char_delay = if fast { self.fast_delay } else { self.normal_delay };
    }

    /// Number of codepoints currently revealed
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Length of the full target text in codepoints
    pub fn full_len(&self) -> usize {
        self.full_text.len()
    }

    /// Wrap cache for the current line
    pub fn wrapped_lines(&self) -> &[String] {
        &self.wrapped
    }
}

/// Accept only printable text: non-empty, no control characters besides
/// newline, under the codepoint cap
fn validate_line(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let mut count = 0usize;
    for ch in text.chars() {
        if (ch as u32) < 32 && ch != '\n' {
            return false;
        }
        count += 1;
    }

    count < MAX_LINE_CODEPOINTS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typewriter_with_line(text: &str) -> Typewriter {
        let atlas = FontAtlas::synthetic(10.0);
        let mut tw = Typewriter::new();
        assert!(tw.set_line(text, &atlas, 980.0));
        tw
    }

    #[test]
    fn test_set_line_enters_animating() {
        let tw = typewriter_with_line("Hello");
        assert_eq!(tw.phase(), TypewriterPhase::Animating);
        assert_eq!(tw.revealed_count(), 0);
        assert_eq!(tw.full_len(), 5);
    }

    #[test]
    fn test_reveal_one_char_per_delay() {
        let mut tw = typewriter_with_line("Hello");
        tw.tick(NORMAL_CHAR_DELAY);
        assert_eq!(tw.revealed_count(), 1);
        tw.tick(NORMAL_CHAR_DELAY);
        assert_eq!(tw.revealed_count(), 2);
        // A tick below the threshold reveals nothing
        tw.tick(NORMAL_CHAR_DELAY * 0.5);
        assert_eq!(tw.revealed_count(), 2);
    }

    #[test]
    fn test_reveal_monotonic_until_complete() {
        let mut tw = typewriter_with_line("Hi there");
        let mut last = 0;
        for _ in 0..200 {
            tw.tick(0.016);
            assert!(tw.revealed_count() >= last);
            last = tw.revealed_count();
        }
        assert_eq!(tw.revealed_count(), tw.full_len());
        assert!(tw.is_animation_complete());
    }

    #[test]
    fn test_cooldown_gates_advance() {
        let mut tw = typewriter_with_line("Hi");
        tw.complete();
        assert_eq!(tw.phase(), TypewriterPhase::Cooling);
        assert!(!tw.can_advance());

        tw.tick(DEFAULT_ADVANCE_COOLDOWN);
        assert_eq!(tw.phase(), TypewriterPhase::Ready);
        assert!(tw.can_advance());
    }

    #[test]
    fn test_complete_jumps_to_full_reveal() {
        let mut tw = typewriter_with_line("Hello world");
        tw.tick(NORMAL_CHAR_DELAY);
        tw.complete();
        assert_eq!(tw.revealed_count(), tw.full_len());
        assert!(tw.is_animation_complete());
        assert!(!tw.can_advance());
    }

    #[test]
    fn test_fast_mode_speeds_reveal() {
        let mut tw = typewriter_with_line("Hello");
        tw.set_fast_mode(true);
        tw.tick(FAST_CHAR_DELAY);
        assert_eq!(tw.revealed_count(), 1);
    }

    #[test]
    fn test_rejects_empty_text() {
        let atlas = FontAtlas::synthetic(10.0);
        let mut tw = Typewriter::new();
        assert!(!tw.set_line("", &atlas, 980.0));
        assert_eq!(tw.phase(), TypewriterPhase::Idle);
    }

    #[test]
    fn test_rejects_control_characters() {
        let atlas = FontAtlas::synthetic(10.0);
        let mut tw = Typewriter::new();
        assert!(!tw.set_line("bad\ttext", &atlas, 980.0));
        // Newlines are fine
        assert!(tw.set_line("good\ntext", &atlas, 980.0));
    }

    #[test]
    fn test_rejects_over_length_text() {
        let atlas = FontAtlas::synthetic(10.0);
        let mut tw = Typewriter::new();
        let long = "a".repeat(1000);
        assert!(!tw.set_line(&long, &atlas, 980.0));

        let ok = "a".repeat(999);
        assert!(tw.set_line(&ok, &atlas, 980.0));
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut tw = typewriter_with_line("Hello");
        tw.complete();
        let atlas = FontAtlas::synthetic(10.0);

        assert!(!tw.set_line("", &atlas, 980.0));
        assert_eq!(tw.revealed_count(), 5);
        assert_eq!(tw.full_len(), 5);
    }

    #[test]
    fn test_set_line_resets_reveal() {
        let mut tw = typewriter_with_line("Hello");
        tw.complete();
        let atlas = FontAtlas::synthetic(10.0);
        assert!(tw.set_line("again", &atlas, 980.0));
        assert_eq!(tw.revealed_count(), 0);
        assert_eq!(tw.phase(), TypewriterPhase::Animating);
    }

    #[test]
    fn test_idle_cooldown_permits_advance() {
        // With no text set, advancement unlocks once the cooldown elapses,
        // so non-dialog commands can still be advanced past.
        let mut tw = Typewriter::new();
        assert!(!tw.can_advance());
        tw.tick(DEFAULT_ADVANCE_COOLDOWN);
        assert!(tw.can_advance());
    }
}
