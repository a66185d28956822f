// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The glyph pipeline: lookup, measurement, packing and upload.

use alloc::boxed::Box;
use alloc::vec::Vec;

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::atlas::{
    Atlas, AtlasId, AtlasProvider, AtlasRect, ExistingTexture, GlyphCache, GlyphCacheStats,
    GlyphDescriptor, GlyphKey, GlyphRef,
};
use crate::settings::{check_effect_amount, check_kernel_size, check_texture_size};
use crate::{Effect, Error, FontMetrics, FontSystemSettings, GlyphSource, TextureBackend};

/// Glyph sources, their cached glyphs and the atlases holding them.
///
/// `T` is the texture handle type of the [`TextureBackend`] glyphs are
/// uploaded through.
///
/// Every glyph goes through the same steps on its first request:
///
/// 1. A codepoint is resolved by asking each source in the order they were
///    added. When none has it, the miss is cached and the default character
///    (if any) is tried once instead.
/// 2. The glyph box is measured and padded for the configured effect.
/// 3. Only when a backend is supplied, the padded box is packed into the
///    current atlas, rasterized and uploaded. A full atlas is replaced by a
///    new one and packing is tried once more.
///
/// Later requests with an equal [`GlyphKey`] are answered from the cache.
pub struct FontSystem<T> {
    settings: FontSystemSettings,
    sources: Vec<Box<dyn GlyphSource>>,
    provider: AtlasProvider<T>,
    cache: GlyphCache,
    font_metrics: HashMap<(u32, u32), FontMetrics, FixedState>,
    atlas_full_count: u64,
}

impl<T> FontSystem<T> {
    /// Creates a font system without sources.
    pub fn new(settings: FontSystemSettings) -> Result<Self, Error> {
        settings.validate()?;
        Ok(Self {
            provider: AtlasProvider::new(settings.texture_width, settings.texture_height),
            settings,
            sources: Vec::new(),
            cache: GlyphCache::new(),
            font_metrics: HashMap::with_hasher(FixedState::default()),
            atlas_full_count: 0,
        })
    }

    /// Creates a font system whose first atlas lives in `existing`.
    pub fn with_existing_texture(
        settings: FontSystemSettings,
        existing: ExistingTexture<T>,
    ) -> Result<Self, Error> {
        let mut system = Self::new(settings)?;
        system.provider.set_existing_texture(Some(existing));
        Ok(system)
    }

    /// The settings this font system was created with.
    #[inline]
    pub fn settings(&self) -> &FontSystemSettings {
        &self.settings
    }

    /// Appends a glyph source and returns its font index.
    ///
    /// Codepoints are resolved against sources in the order they were added.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source counts stay far below u32::MAX"
    )]
    pub fn add_source<S: GlyphSource + 'static>(&mut self, source: S) -> u32 {
        self.sources.push(Box::new(source));
        (self.sources.len() - 1) as u32
    }

    /// Number of glyph sources.
    #[inline]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Key for `codepoint` at `size` with the configured effect.
    #[inline]
    pub fn key(&self, codepoint: char, size: u32) -> GlyphKey {
        GlyphKey::codepoint(codepoint, size, self.settings.effect())
    }

    /// Every atlas created since the last reset, oldest first.
    #[inline]
    pub fn atlases(&self) -> &[Atlas<T>] {
        self.provider.atlases()
    }

    /// The atlas a rendered descriptor points to.
    #[inline]
    pub fn atlas(&self, id: AtlasId) -> Option<&Atlas<T>> {
        self.provider.get(id)
    }

    /// Cache and atlas counters.
    pub fn stats(&self) -> GlyphCacheStats {
        self.cache
            .stats(self.provider.atlases().len(), self.atlas_full_count)
    }

    /// Measures a glyph without rendering it.
    ///
    /// The returned descriptor has `atlas == None` unless the glyph was
    /// rendered before. `Ok(None)` means no source has the glyph, not even
    /// as the default character. Keys with an effect amount above
    /// [`MAX_EFFECT_AMOUNT`](crate::MAX_EFFECT_AMOUNT) are rejected.
    pub fn glyph_metrics(&mut self, key: GlyphKey) -> Result<Option<GlyphDescriptor>, Error> {
        let key = key.normalized();
        check_effect_amount(key.effect.amount())?;
        if let Some(glyph) = self.measured(key)? {
            return Ok(Some(glyph));
        }
        match self.fallback_key(key) {
            Some(fallback) => self.measured(fallback),
            None => Ok(None),
        }
    }

    /// Ascent, descent and line height of a source at `size`.
    pub fn font_metrics(&mut self, font_index: u32, size: u32) -> Result<FontMetrics, Error> {
        if let Some(metrics) = self.font_metrics.get(&(font_index, size)) {
            return Ok(*metrics);
        }
        let metrics = self.source(font_index)?.font_metrics(size);
        self.font_metrics.insert((font_index, size), metrics);
        Ok(metrics)
    }

    /// Drops every cached glyph and atlas.
    pub fn reset(&mut self) {
        log::debug!(
            "Resetting font system with {} atlases",
            self.provider.atlases().len()
        );
        self.cache.clear();
        self.font_metrics.clear();
        self.provider.clear();
        self.atlas_full_count = 0;
    }

    /// Drops every cached glyph and atlas, and changes the size of the
    /// atlases created from now on.
    pub fn reset_texture_size(&mut self, width: u32, height: u32) -> Result<(), Error> {
        check_texture_size(width, height)?;
        check_kernel_size(&self.settings, width, height)?;
        self.reset();
        self.settings.texture_width = width;
        self.settings.texture_height = height;
        self.provider.set_size(width, height);
        Ok(())
    }

    /// Kerning to apply between two glyphs, zero across sources or when
    /// kerning is disabled.
    pub(crate) fn kern(&self, previous: &GlyphDescriptor, glyph: &GlyphDescriptor) -> i32 {
        if !self.settings.use_kernings || previous.font_index != glyph.font_index {
            return 0;
        }
        self.sources
            .get(glyph.font_index as usize)
            .map_or(0, |source| source.kern_advance(previous.id, glyph.id, glyph.size))
    }

    fn source(&self, font_index: u32) -> Result<&dyn GlyphSource, Error> {
        self.sources
            .get(font_index as usize)
            .map(|source| &**source)
            .ok_or(Error::FontIndexOutOfRange {
                index: font_index,
                count: self.sources.len(),
            })
    }

    /// The key to try when `key` has no glyph.
    fn fallback_key(&self, key: GlyphKey) -> Option<GlyphKey> {
        match (key.glyph, self.settings.default_character) {
            (GlyphRef::Codepoint(requested), Some(default)) if requested != default => {
                Some(key.with_codepoint(default))
            }
            _ => None,
        }
    }

    fn measured(&mut self, key: GlyphKey) -> Result<Option<GlyphDescriptor>, Error> {
        match self.cache.get_metrics(&key) {
            Some(hit) => Ok(hit),
            None => self.resolve(key),
        }
    }

    /// Looks the glyph up in the sources and caches the measurement.
    fn resolve(&mut self, key: GlyphKey) -> Result<Option<GlyphDescriptor>, Error> {
        let found = match key.glyph {
            GlyphRef::Codepoint(codepoint) => self
                .sources
                .iter()
                .zip(0_u32..)
                .find_map(|(source, index)| source.glyph_id(codepoint).map(|id| (index, id))),
            GlyphRef::GlyphId(id) => {
                self.source(key.font_index)?;
                Some((key.font_index, id))
            }
        };
        let glyph = match found {
            Some((font_index, id)) => Some(self.measure(key, font_index, id)?),
            None => None,
        };
        self.cache.insert_metrics(key, glyph);
        Ok(glyph)
    }

    fn measure(&self, key: GlyphKey, font_index: u32, id: u32) -> Result<GlyphDescriptor, Error> {
        let metrics = self.source(font_index)?.glyph_metrics(id, key.size);
        let margins = 2 * key.effect.padding();
        // Saturates for absurd boxes, which then fail to pack as too large.
        let bounds = if metrics.width() == 0 || metrics.height() == 0 {
            AtlasRect::default()
        } else {
            AtlasRect::new(
                0,
                0,
                metrics
                    .width()
                    .saturating_add(self.settings.kernel_width)
                    .saturating_add(margins),
                metrics
                    .height()
                    .saturating_add(self.settings.kernel_height)
                    .saturating_add(margins),
            )
        };
        // Only blur moves the origin; plain and stroked glyphs keep the two
        // pixel margin.
        let offset = match key.effect {
            Effect::Blurry(amount) => i32::from(amount) + 2,
            Effect::None | Effect::Stroked(_) => 2,
        };
        Ok(GlyphDescriptor {
            id,
            codepoint: match key.glyph {
                GlyphRef::Codepoint(codepoint) => Some(codepoint),
                GlyphRef::GlyphId(_) => None,
            },
            font_index,
            size: key.size,
            bounds,
            x_advance: metrics.advance,
            x_offset: metrics.x0.saturating_sub(offset),
            y_offset: metrics.y0.saturating_sub(offset),
            atlas: None,
            effect: key.effect,
        })
    }
}

impl<T: Clone> FontSystem<T> {
    /// Returns a glyph rendered into an atlas, rendering it on first use.
    ///
    /// Empty glyphs (spaces) are returned with `atlas == None`. A glyph that
    /// fits neither the current atlas nor an empty one is reported as
    /// [`Error::GlyphTooLarge`], and so is an effect amount above
    /// [`MAX_EFFECT_AMOUNT`](crate::MAX_EFFECT_AMOUNT) as
    /// [`Error::EffectAmountOutOfRange`].
    pub fn glyph<B>(&mut self, key: GlyphKey, backend: &mut B) -> Result<Option<GlyphDescriptor>, Error>
    where
        B: TextureBackend<Texture = T> + ?Sized,
    {
        let key = key.normalized();
        check_effect_amount(key.effect.amount())?;
        if let Some(glyph) = self.rendered(key, backend)? {
            return Ok(Some(glyph));
        }
        match self.fallback_key(key) {
            Some(fallback) => self.rendered(fallback, backend),
            None => Ok(None),
        }
    }

    fn rendered<B>(&mut self, key: GlyphKey, backend: &mut B) -> Result<Option<GlyphDescriptor>, Error>
    where
        B: TextureBackend<Texture = T> + ?Sized,
    {
        if let Some(hit) = self.cache.get_rendered(&key) {
            return Ok(hit);
        }
        let measured = match self.cache.peek_metrics(&key) {
            Some(entry) => entry,
            None => self.resolve(key)?,
        };
        let Some(mut glyph) = measured else {
            return Ok(None);
        };
        if !glyph.is_empty() {
            self.place(&mut glyph, backend)?;
        }
        self.cache.insert_rendered(key, Some(glyph));
        Ok(Some(glyph))
    }

    /// Packs, rasterizes and uploads `glyph`, filling in its atlas placement.
    ///
    /// The current atlas may be an existing texture of another size than
    /// fresh atlases, so the glyph is checked against both.
    fn place<B>(&mut self, glyph: &mut GlyphDescriptor, backend: &mut B) -> Result<(), Error>
    where
        B: TextureBackend<Texture = T> + ?Sized,
    {
        let (width, height) = (glyph.bounds.width, glyph.bounds.height);
        let fits = |(w, h): (u32, u32)| width <= w && height <= h;
        let fits_current = fits(self.provider.current_atlas_size());
        let (atlas_width, atlas_height) = self.provider.fresh_atlas_size();
        let fits_fresh = fits((atlas_width, atlas_height));
        let too_large = Error::GlyphTooLarge {
            width,
            height,
            atlas_width,
            atlas_height,
        };
        if !fits_current && !fits_fresh {
            return Err(too_large);
        }

        let (mut id, mut atlas) = self.provider.current_atlas();
        let placed = if fits_current {
            atlas.add_rect(width, height)
        } else {
            None
        };
        let position = match placed {
            Some(position) => position,
            None => {
                if !fits_fresh {
                    return Err(too_large);
                }
                self.atlas_full_count += 1;
                log::warn!(
                    "Atlas {} is full, starting a new one for a {width}x{height} glyph",
                    id.index()
                );
                self.provider.discard_current();
                (id, atlas) = self.provider.current_atlas();
                atlas.add_rect(width, height).ok_or(too_large)?
            }
        };

        glyph.bounds.x = position.0;
        glyph.bounds.y = position.1;
        glyph.atlas = Some(id);

        let count = self.sources.len();
        let source = self
            .sources
            .get_mut(glyph.font_index as usize)
            .ok_or(Error::FontIndexOutOfRange {
                index: glyph.font_index,
                count,
            })?;
        atlas.render_glyph(
            backend,
            &mut **source,
            glyph,
            self.settings.glyph_render_result,
            self.settings.post_processor,
        );
        Ok(())
    }
}

impl<T> core::fmt::Debug for FontSystem<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontSystem")
            .field("settings", &self.settings)
            .field("sources", &self.sources.len())
            .field("provider", &self.provider)
            .field("cache", &self.cache)
            .field("font_metrics", &self.font_metrics.len())
            .field("atlas_full_count", &self.atlas_full_count)
            .finish()
    }
}
