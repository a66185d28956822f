// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph Atlas rasterizes glyphs on demand and packs them into texture atlases.
//!
//! The entry point is [`FontSystem`]. It owns an ordered list of
//! [`GlyphSource`]s (the font rasterizers), a [`GlyphCache`] keyed by
//! [`GlyphKey`], and an [`AtlasProvider`] holding every atlas created so far.
//! Pixels reach the GPU (or wherever they go) through a caller supplied
//! [`TextureBackend`].
//!
//! ```text
//! GlyphKey ──miss──▶ GlyphSource ──coverage──▶ post-processor ──RGBA──▶ Atlas
//!                                                                        │
//!   GlyphDescriptor ◀──────────── cache ◀──── SkylinePacker + upload ◀───┘
//! ```
//!
//! Measurement never touches an atlas: [`FontSystem::glyph_metrics`] and the
//! text measuring helpers only compute bounds.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use core_maths as _;

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod atlas;
pub mod effect;
mod error;
mod font_system;
mod settings;
mod source;
mod text;
mod texture;

pub use atlas::{
    Atlas, AtlasId, AtlasProvider, AtlasRect, Effect, ExistingTexture, GlyphCache,
    GlyphCacheStats, GlyphDescriptor, GlyphKey, GlyphRef, MAX_EFFECT_AMOUNT, SkylineNode,
    SkylinePacker,
};
pub use effect::{GlyphPostProcessor, GlyphRenderOptions, GlyphRenderResult};
pub use error::Error;
pub use font_system::FontSystem;
pub use settings::FontSystemSettings;
pub use source::{FontMetrics, GlyphMetrics, GlyphSource, RasterTarget};
pub use text::{PositionedGlyph, TextBounds};
pub use texture::TextureBackend;
