// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The glyph source: the font rasterizer as seen by the atlas.

/// Horizontal advance and bounding box of a glyph at a given pixel size.
///
/// The box is in pixels relative to the pen position, y pointing down, so
/// `y0` is usually negative (above the baseline).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Horizontal advance.
    pub advance: i32,
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl GlyphMetrics {
    /// Width of the bounding box, zero for inverted boxes.
    #[inline]
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0).max(0).unsigned_abs()
    }

    /// Height of the bounding box, zero for inverted boxes.
    #[inline]
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0).max(0).unsigned_abs()
    }
}

/// Vertical metrics of a font at a given pixel size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the top of the line to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line (usually negative).
    pub descent: f32,
    /// Distance between two consecutive baselines.
    pub line_height: f32,
}

/// Destination of a glyph rasterization: a window into an 8-bit coverage buffer.
///
/// The rasterizer writes `height` rows of `width` coverage bytes, row `r`
/// starting at `start + r * stride`.
#[derive(Debug)]
pub struct RasterTarget<'a> {
    /// The whole coverage buffer.
    pub buffer: &'a mut [u8],
    /// Index of the first byte of the first row.
    pub start: usize,
    /// Number of bytes to write per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Distance between the starts of two rows.
    pub stride: usize,
}

impl RasterTarget<'_> {
    /// Returns row `y` of the target window.
    ///
    /// # Panics
    ///
    /// Panics if `y >= self.height`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row {y} out of range");
        let start = self.start + y * self.stride;
        &mut self.buffer[start..start + self.width]
    }
}

/// A font able to map codepoints to glyphs, report metrics and rasterize.
///
/// Implementations wrap a concrete rasterizer (TrueType, FreeType, ...).
/// Sizes are integral pixel sizes.
pub trait GlyphSource {
    /// Returns the glyph for `codepoint`, or `None` if the font has none.
    fn glyph_id(&self, codepoint: char) -> Option<u32>;

    /// Returns the advance and bounding box of `glyph_id` at `size`.
    fn glyph_metrics(&self, glyph_id: u32, size: u32) -> GlyphMetrics;

    /// Returns the vertical metrics of the font at `size`.
    fn font_metrics(&self, size: u32) -> FontMetrics;

    /// Returns the kerning adjustment between two glyphs at `size`.
    fn kern_advance(&self, previous: u32, glyph_id: u32, size: u32) -> i32;

    /// Writes the 8-bit coverage of `glyph_id` at `size` into `target`.
    fn rasterize_glyph(&mut self, glyph_id: u32, size: u32, target: RasterTarget<'_>);
}
