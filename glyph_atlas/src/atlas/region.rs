// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas rectangles and cached glyph descriptors.

use super::key::Effect;

/// A rectangle in atlas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AtlasRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl AtlasRect {
    /// Creates a rectangle from its position and size.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive), saturating at `u32::MAX`.
    #[inline]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating at `u32::MAX`.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` if the rectangle covers no pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if both rectangles share at least one pixel.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Identifies an atlas within an [`AtlasProvider`](super::AtlasProvider).
///
/// Atlases are never removed individually, so an id stays valid until the
/// provider is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtlasId(pub(crate) u32);

impl AtlasId {
    /// Position of the atlas in creation order.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Placement and metrics of a cached glyph.
///
/// Descriptors returned by the measurement path have `atlas == None` and a
/// `bounds` position of `(0, 0)`. Rendered descriptors carry the atlas and
/// the packed position; `bounds` then is the source rectangle to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphDescriptor {
    /// Glyph index within its font.
    pub id: u32,
    /// The codepoint this glyph was resolved from, if any.
    pub codepoint: Option<char>,
    /// Index of the glyph source that provided the glyph.
    pub font_index: u32,
    /// Pixel size.
    pub size: u32,
    /// Padded bitmap rectangle.
    pub bounds: AtlasRect,
    /// Horizontal advance.
    pub x_advance: i32,
    /// Horizontal offset from the pen position to the left of `bounds`.
    pub x_offset: i32,
    /// Vertical offset from the baseline to the top of `bounds`.
    pub y_offset: i32,
    /// The atlas holding the bitmap, if it was rendered.
    pub atlas: Option<AtlasId>,
    /// Effect baked into the bitmap.
    pub effect: Effect,
}

impl GlyphDescriptor {
    /// Returns `true` for glyphs without pixels, such as spaces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}
