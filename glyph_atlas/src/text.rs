// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain text measurement and glyph placement.
//!
//! Text is laid out one line per `'\n'`, glyph by glyph, with kerning and
//! character spacing between neighbours. There is no shaping: every `char`
//! maps to one glyph.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use core_maths::CoreFloat as _;

use crate::{Error, FontSystem, GlyphDescriptor, TextureBackend};

/// An axis-aligned box given by two corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl TextBounds {
    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y
    }
}

/// A rendered glyph and where to draw it.
///
/// The source rectangle is `glyph.bounds` in the atlas `glyph.atlas`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    /// The glyph as cached.
    pub glyph: GlyphDescriptor,
    /// Left edge of the destination.
    pub x: f32,
    /// Top edge of the destination.
    pub y: f32,
    /// Destination width.
    pub width: f32,
    /// Destination height.
    pub height: f32,
}

/// Pen state while walking a string.
struct Pen {
    x: f32,
    y: f32,
    start_x: f32,
    line_height: f32,
    spacing: f32,
    previous: Option<GlyphDescriptor>,
}

impl Pen {
    fn new_line(&mut self) {
        self.x = self.start_x;
        self.y += self.line_height;
        self.previous = None;
    }

    /// Moves past `glyph` and returns the box it covers.
    fn advance<T>(&mut self, system: &FontSystem<T>, glyph: &GlyphDescriptor) -> TextBounds {
        if let Some(previous) = &self.previous {
            let kern = system.kern(previous, glyph) as f32;
            self.x += (kern + self.spacing + 0.5).trunc();
        }
        let x = self.x + glyph.x_offset as f32;
        let y = self.y + glyph.y_offset as f32;
        self.x += glyph.x_advance as f32;
        self.previous = Some(*glyph);
        TextBounds {
            x,
            y,
            x2: x + glyph.bounds.width as f32,
            y2: y + glyph.bounds.height as f32,
        }
    }
}

impl<T> FontSystem<T> {
    /// Ascent and line height from the font of the first glyph found.
    fn line_metrics(&mut self, text: &str, size: u32) -> Result<(f32, f32), Error> {
        for c in text.chars() {
            let Some(glyph) = self.glyph_metrics(self.key(c, size))? else {
                continue;
            };
            let metrics = self.font_metrics(glyph.font_index, size)?;
            return Ok((metrics.ascent, metrics.line_height + self.settings().line_spacing));
        }
        Ok((0.0, 0.0))
    }

    fn pen(&mut self, text: &str, size: u32, position: (f32, f32)) -> Result<Pen, Error> {
        let (ascent, line_height) = self.line_metrics(text, size)?;
        Ok(Pen {
            x: position.0,
            y: position.1 + ascent,
            start_x: position.0,
            line_height,
            spacing: self.settings().character_spacing,
            previous: None,
        })
    }

    /// Measures `text` starting at `position` (the top-left of the first line).
    ///
    /// Returns the horizontal advance of the last line and the box covered
    /// by all glyphs. Nothing is rendered.
    pub fn text_bounds(
        &mut self,
        text: &str,
        size: u32,
        position: (f32, f32),
    ) -> Result<(f32, TextBounds), Error> {
        if text.is_empty() {
            return Ok((0.0, TextBounds::default()));
        }
        let mut pen = self.pen(text, size, position)?;
        let mut bounds = TextBounds {
            x: pen.x,
            y: pen.y,
            x2: pen.x,
            y2: pen.y,
        };

        for c in text.chars() {
            if c == '\n' {
                pen.new_line();
                continue;
            }
            let Some(glyph) = self.glyph_metrics(self.key(c, size))? else {
                continue;
            };
            let quad = pen.advance(self, &glyph);
            bounds.x = bounds.x.min(quad.x);
            bounds.x2 = bounds.x2.max(pen.x);
            bounds.y = bounds.y.min(quad.y);
            bounds.y2 = bounds.y2.max(quad.y2);
        }

        bounds.x2 += f32::from(self.settings().effect().amount()) * 2.0;
        Ok((pen.x - pen.start_x, bounds))
    }

    /// Width and height of `text` laid out at the origin.
    pub fn measure_text(&mut self, text: &str, size: u32) -> Result<(f32, f32), Error> {
        let (_, bounds) = self.text_bounds(text, size, (0.0, 0.0))?;
        Ok((bounds.x2, bounds.y2))
    }

    /// The box of every glyph of `text`, in order, without rendering.
    ///
    /// Empty glyphs such as spaces are included with their zero-size box.
    pub fn glyph_rects(
        &mut self,
        text: &str,
        size: u32,
        position: (f32, f32),
    ) -> Result<Vec<TextBounds>, Error> {
        let mut rects = Vec::new();
        if text.is_empty() {
            return Ok(rects);
        }
        let mut pen = self.pen(text, size, position)?;
        for c in text.chars() {
            if c == '\n' {
                pen.new_line();
                continue;
            }
            if let Some(glyph) = self.glyph_metrics(self.key(c, size))? {
                rects.push(pen.advance(self, &glyph));
            }
        }
        Ok(rects)
    }
}

impl<T: Clone> FontSystem<T> {
    /// Renders every glyph of `text` into the atlases and returns where each
    /// one should be drawn.
    ///
    /// Glyphs without pixels advance the pen but are left out of the result.
    pub fn layout_glyphs<B>(
        &mut self,
        text: &str,
        size: u32,
        position: (f32, f32),
        backend: &mut B,
    ) -> Result<Vec<PositionedGlyph>, Error>
    where
        B: TextureBackend<Texture = T> + ?Sized,
    {
        let mut glyphs = Vec::new();
        if text.is_empty() {
            return Ok(glyphs);
        }
        let mut pen = self.pen(text, size, position)?;
        for c in text.chars() {
            if c == '\n' {
                pen.new_line();
                continue;
            }
            let Some(glyph) = self.glyph(self.key(c, size), backend)? else {
                continue;
            };
            let quad = pen.advance(self, &glyph);
            if !glyph.is_empty() {
                glyphs.push(PositionedGlyph {
                    glyph,
                    x: quad.x,
                    y: quad.y,
                    width: quad.width(),
                    height: quad.height(),
                });
            }
        }
        Ok(glyphs)
    }
}
