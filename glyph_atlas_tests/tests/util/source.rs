// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A glyph source with made-up glyphs that counts how it is used.

use std::cell::Cell;
use std::rc::Rc;

use glyph_atlas::{FontMetrics, GlyphMetrics, GlyphSource, RasterTarget};

/// Shared call counters, still readable after the source moved into a
/// font system.
#[derive(Clone, Debug, Default)]
pub(crate) struct SourceCalls {
    glyph_id: Rc<Cell<usize>>,
    metrics: Rc<Cell<usize>>,
    rasterize: Rc<Cell<usize>>,
}

impl SourceCalls {
    pub(crate) fn glyph_id(&self) -> usize {
        self.glyph_id.get()
    }

    pub(crate) fn metrics(&self) -> usize {
        self.metrics.get()
    }

    pub(crate) fn rasterize(&self) -> usize {
        self.rasterize.get()
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

#[derive(Debug)]
pub(crate) struct StubSource {
    glyphs: Vec<(char, GlyphMetrics)>,
    coverage: u8,
    font_metrics: FontMetrics,
    calls: SourceCalls,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self {
            glyphs: Vec::new(),
            coverage: 255,
            font_metrics: FontMetrics {
                ascent: 12.0,
                descent: -4.0,
                line_height: 16.0,
            },
            calls: SourceCalls::default(),
        }
    }

    /// Every lowercase letter as a `width` × `height` box sitting on the
    /// baseline, plus an empty space.
    pub(crate) fn letters(width: i32, height: i32) -> Self {
        let mut source = Self::new().with_glyph(
            ' ',
            GlyphMetrics {
                advance: width / 2,
                ..GlyphMetrics::default()
            },
        );
        for c in 'a'..='z' {
            source = source.with_glyph(
                c,
                GlyphMetrics {
                    advance: width + 1,
                    x0: 0,
                    y0: -height,
                    x1: width,
                    y1: 0,
                },
            );
        }
        source
    }

    pub(crate) fn with_glyph(mut self, codepoint: char, metrics: GlyphMetrics) -> Self {
        self.glyphs.push((codepoint, metrics));
        self
    }

    /// Coverage value written into every rasterized pixel.
    pub(crate) fn with_coverage(mut self, coverage: u8) -> Self {
        self.coverage = coverage;
        self
    }

    pub(crate) fn calls(&self) -> SourceCalls {
        self.calls.clone()
    }
}

impl GlyphSource for StubSource {
    fn glyph_id(&self, codepoint: char) -> Option<u32> {
        bump(&self.calls.glyph_id);
        self.glyphs
            .iter()
            .position(|(c, _)| *c == codepoint)
            .map(|index| index as u32 + 1)
    }

    fn glyph_metrics(&self, glyph_id: u32, _size: u32) -> GlyphMetrics {
        bump(&self.calls.metrics);
        self.glyphs
            .get(glyph_id as usize - 1)
            .map(|(_, metrics)| *metrics)
            .unwrap_or_default()
    }

    fn font_metrics(&self, _size: u32) -> FontMetrics {
        self.font_metrics
    }

    fn kern_advance(&self, _previous: u32, _glyph_id: u32, _size: u32) -> i32 {
        0
    }

    /// Fills the glyph box, anchored at the top-left of the window.
    fn rasterize_glyph(&mut self, glyph_id: u32, _size: u32, mut target: RasterTarget<'_>) {
        bump(&self.calls.rasterize);
        let metrics = self
            .glyphs
            .get(glyph_id as usize - 1)
            .map(|(_, metrics)| *metrics)
            .unwrap_or_default();
        let width = (metrics.width() as usize).min(target.width);
        let height = (metrics.height() as usize).min(target.height);
        for y in 0..height {
            target.row_mut(y)[..width].fill(self.coverage);
        }
    }
}
