// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single atlas texture and its packer.

use alloc::vec::Vec;

use super::packer::SkylinePacker;
use super::region::{AtlasRect, GlyphDescriptor};
use crate::effect::{GlyphPostProcessor, GlyphRenderOptions, GlyphRenderResult};
use crate::{Error, GlyphSource, RasterTarget, TextureBackend};

/// One atlas texture.
///
/// The texture is created through the [`TextureBackend`] the first time a
/// glyph is rendered into the atlas, unless it was seeded with an existing
/// one. Rasterization goes through scratch buffers owned by the atlas which
/// only ever grow.
pub struct Atlas<T> {
    packer: SkylinePacker,
    texture: Option<T>,
    coverage: Vec<u8>,
    rgba: Vec<u8>,
}

impl<T> Atlas<T> {
    /// Creates an empty atlas without a texture.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            packer: SkylinePacker::new(width, height),
            texture: None,
            coverage: Vec::new(),
            rgba: Vec::new(),
        }
    }

    /// Creates an atlas on top of an existing texture.
    ///
    /// The area `[0, used.right()) × [0, used.bottom())` is reserved so that
    /// glyphs never overwrite what the texture already holds.
    pub fn with_texture(texture: T, width: u32, height: u32, used: AtlasRect) -> Result<Self, Error> {
        check_used_space(used, width, height)?;
        Ok(Self::seeded(texture, width, height, used))
    }

    pub(crate) fn seeded(texture: T, width: u32, height: u32, used: AtlasRect) -> Self {
        let mut atlas = Self::new(width, height);
        if !used.is_empty() {
            atlas
                .packer
                .add_skyline_level(0, 0, 0, used.right(), used.bottom());
        }
        atlas.texture = Some(texture);
        atlas
    }

    /// Forgets every placement.
    ///
    /// The texture survives when the size is unchanged; its stale pixels are
    /// overwritten as new glyphs land on them.
    pub fn reset(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width(), self.height()) {
            self.texture = None;
        }
        self.packer.reset(width, height);
        log::debug!("Reset glyph atlas to {width}x{height}");
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.packer.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.packer.height()
    }

    /// The texture, once created.
    #[inline]
    pub fn texture(&self) -> Option<&T> {
        self.texture.as_ref()
    }

    /// The skyline packer of this atlas.
    #[inline]
    pub fn packer(&self) -> &SkylinePacker {
        &self.packer
    }

    /// Reserves a `width` × `height` rectangle, or returns `None` if the
    /// atlas is full for that size.
    #[inline]
    pub fn add_rect(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        self.packer.add_rect(width, height)
    }

    /// Rasterizes `glyph` and uploads it at `glyph.bounds`.
    ///
    /// The bounds must have been reserved with [`add_rect`](Self::add_rect).
    /// The region is erased before the final pixels are written, so a glyph
    /// never shows through what an earlier texture generation left there.
    pub(crate) fn render_glyph<B>(
        &mut self,
        backend: &mut B,
        source: &mut dyn GlyphSource,
        glyph: &GlyphDescriptor,
        render_result: GlyphRenderResult,
        post_processor: GlyphPostProcessor,
    ) where
        B: TextureBackend<Texture = T> + ?Sized,
    {
        if glyph.is_empty() {
            return;
        }

        let bounds = glyph.bounds;
        let width = bounds.width as usize;
        let height = bounds.height as usize;
        let len = width * height;
        if self.coverage.len() < len {
            self.coverage.resize(len, 0);
        }
        if self.rgba.len() < len * 4 {
            self.rgba.resize(len * 4, 0);
        }
        let coverage = &mut self.coverage[..len];
        let rgba = &mut self.rgba[..len * 4];
        coverage.fill(0);
        rgba.fill(0);

        // The window is inset by the effect amount so blur and stroke can
        // spread outwards; the remaining margin is left to the rasterizer.
        let inset = usize::from(glyph.effect.amount());
        let inner_width = width.saturating_sub(2 * inset);
        let inner_height = height.saturating_sub(2 * inset);
        if inner_width > 0 && inner_height > 0 {
            source.rasterize_glyph(
                glyph.id,
                glyph.size,
                RasterTarget {
                    buffer: coverage,
                    start: inset + inset * width,
                    width: inner_width,
                    height: inner_height,
                    stride: width,
                },
            );
        }

        let (atlas_width, atlas_height) = (self.packer.width(), self.packer.height());
        let texture = self.texture.get_or_insert_with(|| {
            log::debug!("Creating {atlas_width}x{atlas_height} atlas texture");
            backend.create_texture(atlas_width, atlas_height)
        });

        backend.set_texture_data(texture, bounds, rgba);

        let options = GlyphRenderOptions {
            effect: glyph.effect,
            width,
            height,
            render_result,
        };
        post_processor(coverage, rgba, &options);

        backend.set_texture_data(texture, bounds, rgba);
    }
}

pub(crate) fn check_used_space(used: AtlasRect, width: u32, height: u32) -> Result<(), Error> {
    if used.right() > width || used.bottom() > height {
        return Err(Error::UsedSpaceOutOfBounds {
            used,
            width,
            height,
        });
    }
    Ok(())
}

impl<T> core::fmt::Debug for Atlas<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Atlas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("nodes", &self.packer.nodes().len())
            .field("has_texture", &self.texture.is_some())
            .finish_non_exhaustive()
    }
}
