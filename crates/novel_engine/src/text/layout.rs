//! Text layout engine
//!
//! Word-wraps strings against glyph advance metrics and converts revealed
//! text prefixes into positioned, textured quads. Layout is stateless: the
//! quad list is re-derived from the revealed count every frame.

use super::font_atlas::FontAtlas;
use crate::foundation::math::Vec2;

/// Vertex data for text rendering
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct TextVertex {
    /// Position in screen space (pixels, +Y down)
    pub position: Vec2,
    /// UV texture coordinates into the font atlas
    pub uv: Vec2,
}

/// One glyph quad: two triangles, six vertices
#[derive(Debug, Clone, Copy)]
pub struct GlyphQuad {
    /// Triangle list: (top-left, top-right, bottom-left),
    /// (top-right, bottom-right, bottom-left)
    pub vertices: [TextVertex; 6],
}

/// Word-wrap `text` into lines no wider than `max_width` pixels
///
/// Spaces and newlines flush the pending word: when the word no longer fits
/// on the current line the line is emitted and the word starts the next one.
/// A space is kept on the line only while it still fits; a newline always
/// flushes, even when the line is empty. Codepoints without an atlas entry
/// are skipped entirely and never contribute width.
pub fn wrap_text(text: &str, atlas: &FontAtlas, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_word = String::new();
    let mut line_width = 0.0f32;
    let mut word_width = 0.0f32;

    // Appends the pending word, starting a new line when it no longer fits
    fn flush_word(
        lines: &mut Vec<String>,
        current_line: &mut String,
        current_word: &mut String,
        line_width: &mut f32,
        word_width: &mut f32,
        max_width: f32,
    ) {
        if *line_width + *word_width > max_width {
            lines.push(std::mem::take(current_line));
            *current_line = std::mem::take(current_word);
            *line_width = *word_width;
        } else {
            current_line.push_str(current_word);
            current_word.clear();
            *line_width += *word_width;
        }
        *word_width = 0.0;
    }

    for ch in text.chars() {
        if ch == '\n' {
            flush_word(
                &mut lines,
                &mut current_line,
                &mut current_word,
                &mut line_width,
                &mut word_width,
                max_width,
            );
            lines.push(std::mem::take(&mut current_line));
            line_width = 0.0;
            continue;
        }

        let Some(glyph) = atlas.get_glyph(ch) else {
            continue;
        };

        if ch == ' ' {
            let space_advance = glyph.advance;
            flush_word(
                &mut lines,
                &mut current_line,
                &mut current_word,
                &mut line_width,
                &mut word_width,
                max_width,
            );
            if line_width + space_advance <= max_width {
                current_line.push(' ');
                line_width += space_advance;
            }
        } else {
            current_word.push(ch);
            word_width += glyph.advance;
        }
    }

    // Trailing word and line
    if !current_word.is_empty() {
        if line_width + word_width > max_width {
            lines.push(current_line);
            lines.push(current_word);
        } else {
            current_line.push_str(&current_word);
            lines.push(current_line);
        }
    } else if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Lay out the first `revealed_count` codepoints of the wrapped lines
///
/// Rows run top-to-bottom at `line_height` steps, left-aligned at `origin`
/// (the first row's baseline). One quad per visible glyph; quads whose UV
/// rectangle would leave the unit square are dropped, guarding against
/// atlas/metric mismatch.
pub fn layout_reveal(
    lines: &[String],
    revealed_count: usize,
    atlas: &FontAtlas,
    origin: Vec2,
    line_height: f32,
) -> Vec<GlyphQuad> {
    let mut quads = Vec::new();
    if atlas.is_empty() {
        return quads;
    }

    let (atlas_w, atlas_h) = atlas.dimensions();
    let (atlas_w, atlas_h) = (atlas_w as f32, atlas_h as f32);

    let mut total_chars = 0usize;

    for (line_index, line) in lines.iter().enumerate() {
        let mut x = origin.x;
        let baseline_y = origin.y + line_height * line_index as f32;

        for ch in line.chars() {
            if total_chars >= revealed_count {
                return quads;
            }
            total_chars += 1;

            let Some(glyph) = atlas.get_glyph(ch) else {
                continue;
            };

            let left = x + glyph.bearing.x;
            let top = baseline_y + glyph.bearing.y;
            let right = left + glyph.size.x;
            let bottom = top + glyph.size.y;

            let tex_left = glyph.uv_min.x;
            let tex_top = glyph.uv_min.y;
            let tex_right = tex_left + glyph.size.x / atlas_w;
            let tex_bottom = tex_top + glyph.size.y / atlas_h;

            if !uv_in_bounds(tex_left, tex_top) || !uv_in_bounds(tex_right, tex_bottom) {
                x += glyph.advance;
                continue;
            }

            quads.push(GlyphQuad {
                vertices: [
                    TextVertex {
                        position: Vec2::new(left, top),
                        uv: Vec2::new(tex_left, tex_top),
                    },
                    TextVertex {
                        position: Vec2::new(right, top),
                        uv: Vec2::new(tex_right, tex_top),
                    },
                    TextVertex {
                        position: Vec2::new(left, bottom),
                        uv: Vec2::new(tex_left, tex_bottom),
                    },
                    TextVertex {
                        position: Vec2::new(right, top),
                        uv: Vec2::new(tex_right, tex_top),
                    },
                    TextVertex {
                        position: Vec2::new(right, bottom),
                        uv: Vec2::new(tex_right, tex_bottom),
                    },
                    TextVertex {
                        position: Vec2::new(left, bottom),
                        uv: Vec2::new(tex_left, tex_bottom),
                    },
                ],
            });

            x += glyph.advance;
        }
    }

    quads
}

/// Sum of advances for every renderable codepoint in `text`
pub fn measure_width(text: &str, atlas: &FontAtlas) -> f32 {
    text.chars()
        .filter_map(|ch| atlas.get_glyph(ch))
        .map(|glyph| glyph.advance)
        .sum()
}

fn uv_in_bounds(u: f32, v: f32) -> bool {
    (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> FontAtlas {
        FontAtlas::synthetic(10.0)
    }

    #[test]
    fn test_hello_world_wraps_at_seven_chars() {
        let atlas = atlas();
        let lines = wrap_text("Hello world", &atlas, 70.0);
        assert_eq!(lines, vec!["Hello ".to_string(), "world".to_string()]);
    }

    #[test]
    fn test_single_line_fits() {
        let atlas = atlas();
        let lines = wrap_text("Hello world", &atlas, 200.0);
        assert_eq!(lines, vec!["Hello world".to_string()]);
    }

    #[test]
    fn test_line_widths_bounded() {
        let atlas = atlas();
        let max_width = 70.0;
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", &atlas, max_width);
        for line in &lines {
            assert!(
                measure_width(line, &atlas) <= max_width,
                "line {:?} exceeds max width",
                line
            );
        }
    }

    #[test]
    fn test_unsplittable_word_gets_own_line() {
        let atlas = atlas();
        let lines = wrap_text("hi extraordinarily no", &atlas, 70.0);
        assert!(lines.contains(&"extraordinarily".to_string()));
        for line in lines.iter().filter(|l| l.as_str() != "extraordinarily") {
            assert!(measure_width(line, &atlas) <= 70.0);
        }
    }

    #[test]
    fn test_newline_force_flushes() {
        let atlas = atlas();
        let lines = wrap_text("one\n\ntwo", &atlas, 200.0);
        assert_eq!(
            lines,
            vec!["one".to_string(), String::new(), "two".to_string()]
        );
    }

    #[test]
    fn test_unknown_codepoints_skipped() {
        let atlas = atlas();
        let lines = wrap_text("a\u{3042}b", &atlas, 200.0);
        assert_eq!(lines, vec!["ab".to_string()]);
    }

    #[test]
    fn test_reveal_counts_quads() {
        let atlas = atlas();
        let lines = wrap_text("Hello world", &atlas, 70.0);
        let origin = Vec2::new(140.0, 560.0);

        let partial = layout_reveal(&lines, 3, &atlas, origin, 30.0);
        assert_eq!(partial.len(), 3);

        let full = layout_reveal(&lines, 11, &atlas, origin, 30.0);
        assert_eq!(full.len(), 11);

        // Revealing beyond the text length changes nothing
        let over = layout_reveal(&lines, 100, &atlas, origin, 30.0);
        assert_eq!(over.len(), 11);
    }

    #[test]
    fn test_reveal_rows_step_by_line_height() {
        let atlas = atlas();
        let lines = wrap_text("Hello world", &atlas, 70.0);
        let origin = Vec2::new(140.0, 560.0);
        let quads = layout_reveal(&lines, 11, &atlas, origin, 30.0);

        // First glyph of row two sits one line height below row one
        let first = quads[0].vertices[0].position;
        let seventh = quads[6].vertices[0].position;
        assert_eq!(seventh.y - first.y, 30.0);
        assert_eq!(first.x, seventh.x);
    }

    #[test]
    fn test_reveal_zero_is_empty() {
        let atlas = atlas();
        let lines = wrap_text("Hello", &atlas, 200.0);
        assert!(layout_reveal(&lines, 0, &atlas, Vec2::new(0.0, 0.0), 30.0).is_empty());
    }

    #[test]
    fn test_empty_atlas_renders_nothing() {
        let empty = FontAtlas::empty();
        let lines = vec!["Hello".to_string()];
        assert!(layout_reveal(&lines, 5, &empty, Vec2::new(0.0, 0.0), 30.0).is_empty());
    }

    #[test]
    fn test_measure_width() {
        let atlas = atlas();
        assert_eq!(measure_width("Hello", &atlas), 50.0);
        assert_eq!(measure_width("", &atlas), 0.0);
    }
}
