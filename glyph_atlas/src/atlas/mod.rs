// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas storage for rasterized glyphs.
//!
//! - [`SkylinePacker`] places rectangles inside one atlas.
//! - [`Atlas`] pairs a packer with a texture handle and renders glyphs into it.
//! - [`AtlasProvider`] keeps every atlas in creation order and starts a new
//!   one when the current atlas fills up.
//! - [`GlyphCache`] maps a [`GlyphKey`] to the [`GlyphDescriptor`] telling
//!   where the glyph landed.

mod cache;
mod key;
mod packer;
mod page;
mod provider;
mod region;

pub use cache::{GlyphCache, GlyphCacheStats};
pub use key::{Effect, GlyphKey, GlyphRef, MAX_EFFECT_AMOUNT};
pub use packer::{SkylineNode, SkylinePacker};
pub use page::Atlas;
pub use provider::{AtlasProvider, ExistingTexture};
pub use region::{AtlasId, AtlasRect, GlyphDescriptor};
