// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-tier glyph cache.

use core::fmt::{Debug, Formatter};

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use super::key::GlyphKey;
use super::region::GlyphDescriptor;

type Entries = HashMap<GlyphKey, Option<GlyphDescriptor>, FixedState>;

/// Cached glyph descriptors, keyed by [`GlyphKey`].
///
/// Measurement results and rendered glyphs live in separate tiers: a glyph
/// that was only measured has no atlas placement yet, and must be rendered
/// before it can be drawn. Both tiers also remember glyphs that no source
/// could provide (`None` values), so a missing codepoint is looked up once.
pub struct GlyphCache {
    metrics: Entries,
    rendered: Entries,
    /// Number of lookups answered since last `clear_stats()`.
    cache_hits: u64,
    /// Number of lookups not answered since last `clear_stats()`.
    cache_misses: u64,
}

impl GlyphCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            metrics: HashMap::with_hasher(FixedState::default()),
            rendered: HashMap::with_hasher(FixedState::default()),
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    /// Looks up a measured glyph.
    ///
    /// The outer `Option` tells hit from miss; the inner one is `None` for a
    /// glyph known to be missing. A rendered entry also answers a metrics
    /// lookup.
    pub fn get_metrics(&mut self, key: &GlyphKey) -> Option<Option<GlyphDescriptor>> {
        let found = self
            .rendered
            .get(key)
            .or_else(|| self.metrics.get(key))
            .copied();
        self.count(found.is_some());
        found
    }

    /// Looks up a rendered glyph.
    ///
    /// A negative metrics entry answers too: a glyph without a source never
    /// gets rendered.
    pub fn get_rendered(&mut self, key: &GlyphKey) -> Option<Option<GlyphDescriptor>> {
        let found = match self.rendered.get(key) {
            Some(entry) => Some(*entry),
            None => match self.metrics.get(key) {
                Some(None) => Some(None),
                _ => None,
            },
        };
        self.count(found.is_some());
        found
    }

    /// Measurement tier lookup that leaves the counters alone, for a miss
    /// that was already counted.
    pub(crate) fn peek_metrics(&self, key: &GlyphKey) -> Option<Option<GlyphDescriptor>> {
        self.metrics.get(key).copied()
    }

    /// Stores a measured glyph, or `None` for a missing one.
    pub fn insert_metrics(&mut self, key: GlyphKey, glyph: Option<GlyphDescriptor>) {
        self.metrics.insert(key, glyph);
    }

    /// Stores a rendered glyph, or `None` for a missing one.
    pub fn insert_rendered(&mut self, key: GlyphKey, glyph: Option<GlyphDescriptor>) {
        self.rendered.insert(key, glyph);
    }

    fn count(&mut self, hit: bool) {
        if hit {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }
    }

    /// Drops every entry and the statistics.
    pub fn clear(&mut self) {
        self.metrics.clear();
        self.rendered.clear();
        self.clear_stats();
    }

    /// Number of entries over both tiers.
    #[inline]
    pub fn len(&self) -> usize {
        self.metrics.len() + self.rendered.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.rendered.is_empty()
    }

    /// Get the number of cache hits since last `clear_stats()`.
    #[inline]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Get the number of cache misses since last `clear_stats()`.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses
    }

    /// Clear cache hit/miss statistics without clearing the cache itself.
    pub fn clear_stats(&mut self) {
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    /// Snapshot of the cache counters.
    ///
    /// The atlas figures are supplied by the caller because the atlases are
    /// owned by the provider, not the cache.
    pub fn stats(&self, atlas_count: usize, atlas_full_count: u64) -> GlyphCacheStats {
        let negative = self
            .metrics
            .values()
            .chain(self.rendered.values())
            .filter(|entry| entry.is_none())
            .count();
        GlyphCacheStats {
            metrics_entries: self.metrics.len(),
            rendered_entries: self.rendered.len(),
            negative_entries: negative,
            atlas_count,
            atlas_full_count,
            cache_hits: self.cache_hits,
            cache_misses: self.cache_misses,
        }
    }
}

/// Statistics about cached glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphCacheStats {
    /// Entries of the measurement tier.
    pub metrics_entries: usize,
    /// Entries of the rendered tier.
    pub rendered_entries: usize,
    /// Entries recording a missing glyph, over both tiers.
    pub negative_entries: usize,
    /// Atlases created since the last reset.
    pub atlas_count: usize,
    /// Times an atlas ran out of space since the last reset.
    pub atlas_full_count: u64,
    /// Lookups answered from the cache.
    pub cache_hits: u64,
    /// Lookups that had to go to a glyph source.
    pub cache_misses: u64,
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for GlyphCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("metrics", &self.metrics.len())
            .field("rendered", &self.rendered.len())
            .field("cache_hits", &self.cache_hits)
            .field("cache_misses", &self.cache_misses)
            .finish()
    }
}
