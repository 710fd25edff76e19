//! Font atlas generation
//!
//! Rasterizes glyphs from a TrueType/OpenType font with `fontdue` and packs
//! them into a single power-of-two coverage image. The atlas and its glyph
//! table are immutable once built; switching fonts builds a fresh atlas and
//! swaps it in wholesale.

use crate::foundation::math::Vec2;
use fontdue::{Font, FontSettings};
use std::collections::HashMap;
use std::path::Path;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font atlas generation
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to load the font from file or data
    #[error("Failed to load font: {0}")]
    Load(String),

    /// Packing ran out of atlas height before all glyphs were placed
    #[error("Atlas overflow: {placed} of {total} glyphs placed in {width}x{height}")]
    AtlasOverflow {
        /// Glyphs successfully placed before overflow
        placed: usize,
        /// Total glyphs requested
        total: usize,
        /// Atlas width in pixels
        width: u32,
        /// Atlas height in pixels
        height: u32,
    },
}

/// Codepoint ranges rasterized by default: ASCII printable plus Cyrillic
pub const DEFAULT_RANGES: [(u32, u32); 2] = [(32, 126), (1024, 1279)];

/// Padding in pixels around each packed glyph
const GLYPH_PADDING: u32 = 2;

/// Placement and metrics for a single glyph in the atlas
#[derive(Debug, Clone)]
pub struct GlyphInfo {
    /// Top-left corner of the glyph in the atlas, normalized 0.0-1.0
    pub uv_min: Vec2,

    /// Glyph bitmap size in pixels
    pub size: Vec2,

    /// Horizontal advance for cursor positioning
    pub advance: f32,

    /// Offset from the pen position to the glyph's top-left corner
    /// (screen coordinates, +Y down)
    pub bearing: Vec2,
}

/// A packed bitmap font: coverage image plus glyph lookup table
///
/// Shared read-only by every text-rendering call in a frame. A font change
/// replaces the whole structure, so no reader ever observes a half-built
/// atlas.
pub struct FontAtlas {
    /// Single-channel coverage bitmap, row-major
    coverage: Vec<u8>,

    /// Atlas dimensions (powers of two)
    width: u32,
    height: u32,

    /// Glyph information lookup
    glyphs: HashMap<char, GlyphInfo>,

    /// Font line spacing at the rasterized size
    line_height: f32,

    /// Rasterized size in pixels
    font_size: f32,
}

impl FontAtlas {
    /// Build an atlas from raw TrueType/OpenType font bytes
    ///
    /// Rasterizes every codepoint in `ranges` at `font_size` pixels.
    /// Codepoints the font cannot produce are skipped; running out of atlas
    /// space is an error.
    pub fn build(font_data: &[u8], font_size: f32, ranges: &[(u32, u32)]) -> FontResult<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::Load(format!("fontdue error: {}", e)))?;

        // Rasterize everything up front to size the atlas
        let mut rasterized = Vec::new();
        let mut max_glyph_height = 0u32;
        let mut total_width = GLYPH_PADDING;

        for &(start, end) in ranges {
            for code_point in start..=end {
                let Some(ch) = char::from_u32(code_point) else {
                    continue;
                };
                if font.lookup_glyph_index(ch) == 0 && ch != ' ' {
                    log::debug!("Font has no glyph for U+{:04X}, skipping", code_point);
                    continue;
                }

                let (metrics, bitmap) = font.rasterize(ch, font_size);
                max_glyph_height = max_glyph_height.max(metrics.height as u32 + GLYPH_PADDING * 2);
                total_width += metrics.width as u32 + GLYPH_PADDING * 2;
                rasterized.push((ch, metrics, bitmap));
            }
        }

        let width = total_width.next_power_of_two();
        let height = max_glyph_height.next_power_of_two();
        let row_stride = max_glyph_height + GLYPH_PADDING;

        log::info!(
            "Rasterized {} glyphs at {}px, packing into {}x{} atlas",
            rasterized.len(),
            font_size,
            width,
            height
        );

        let mut coverage = vec![0u8; (width * height) as usize];
        let mut glyphs = HashMap::with_capacity(rasterized.len());

        let total = rasterized.len();
        let mut current_x = GLYPH_PADDING;
        let mut current_y = GLYPH_PADDING;

        for (placed, (ch, metrics, bitmap)) in rasterized.into_iter().enumerate() {
            let glyph_w = metrics.width as u32;

            // Blit the glyph bitmap into the coverage image
            for y in 0..metrics.height {
                for x in 0..metrics.width {
                    let dst_x = current_x + x as u32;
                    let dst_y = current_y + y as u32;
                    let dst_idx = (dst_y * width + dst_x) as usize;
                    let src_idx = y * metrics.width + x;

                    if dst_idx < coverage.len() && src_idx < bitmap.len() {
                        coverage[dst_idx] = bitmap[src_idx];
                    }
                }
            }

            glyphs.insert(
                ch,
                GlyphInfo {
                    uv_min: Vec2::new(current_x as f32 / width as f32, current_y as f32 / height as f32),
                    size: Vec2::new(metrics.width as f32, metrics.height as f32),
                    advance: metrics.advance_width,
                    bearing: Vec2::new(
                        metrics.xmin as f32,
                        -(metrics.height as f32 + metrics.ymin as f32),
                    ),
                },
            );

            // Advance the packing cursor, wrapping to a new row on overflow
            current_x += glyph_w + GLYPH_PADDING;
            if current_x + glyph_w + GLYPH_PADDING > width {
                current_x = GLYPH_PADDING;
                current_y += row_stride;
                if current_y + row_stride > height {
                    return Err(FontError::AtlasOverflow {
                        placed: placed + 1,
                        total,
                        width,
                        height,
                    });
                }
            }
        }

        let line_height = font
            .horizontal_line_metrics(font_size)
            .map_or(font_size * 1.2, |m| m.new_line_size);

        log::info!("Atlas packed: {}x{}, {} glyphs cached", width, height, glyphs.len());

        Ok(Self {
            coverage,
            width,
            height,
            glyphs,
            line_height,
            font_size,
        })
    }

    /// Build an atlas from a font file on disk
    pub fn build_from_file<P: AsRef<Path>>(
        path: P,
        font_size: f32,
        ranges: &[(u32, u32)],
    ) -> FontResult<Self> {
        let path_ref = path.as_ref();
        let font_data = std::fs::read(path_ref)
            .map_err(|e| FontError::Load(format!("{}: {}", path_ref.display(), e)))?;
        Self::build(&font_data, font_size, ranges)
    }

    /// Create a zero-sized atlas
    ///
    /// Used when every font load attempt has failed: text rendering
    /// degrades to a no-op instead of faulting.
    pub fn empty() -> Self {
        Self {
            coverage: Vec::new(),
            width: 0,
            height: 0,
            glyphs: HashMap::new(),
            line_height: 0.0,
            font_size: 0.0,
        }
    }

    /// Get glyph information for a character, if the atlas has it
    pub fn get_glyph(&self, ch: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&ch)
    }

    /// Atlas dimensions in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Single-channel coverage bitmap, row-major
    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    /// Font line spacing at the rasterized size
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Rasterized font size in pixels
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Number of glyphs in the lookup table
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// True when the atlas cannot be rendered from (zero-sized or glyphless)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.glyphs.is_empty()
    }

    /// Synthetic fixed-metrics atlas for layout tests
    #[cfg(test)]
    pub(crate) fn synthetic(advance: f32) -> Self {
        let mut glyphs = HashMap::new();
        for code_point in 32u32..=126 {
            let ch = char::from_u32(code_point).unwrap();
            glyphs.insert(
                ch,
                GlyphInfo {
                    uv_min: Vec2::new(0.25, 0.25),
                    size: Vec2::new(advance - 2.0, 16.0),
                    advance,
                    bearing: Vec2::new(1.0, -16.0),
                },
            );
        }
        Self {
            coverage: vec![0u8; 256 * 64],
            width: 256,
            height: 64,
            glyphs,
            line_height: 30.0,
            font_size: 24.0,
        }
    }
}
