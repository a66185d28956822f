// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::AtlasRect;

/// Errors returned by the glyph atlas.
///
/// Configuration errors are reported when a [`FontSystem`] is created or
/// reconfigured. Capacity errors ([`Error::GlyphTooLarge`]) are reported per
/// glyph. A codepoint without a glyph is not an error: lookups return
/// `Ok(None)` for it.
///
/// [`FontSystem`]: crate::FontSystem
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The atlas texture size was zero in at least one dimension.
    InvalidTextureSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A blur or stroke amount exceeded [`MAX_EFFECT_AMOUNT`](crate::MAX_EFFECT_AMOUNT).
    EffectAmountOutOfRange {
        /// The offending amount.
        amount: u32,
    },
    /// Blur and stroke were both requested.
    ConflictingEffects {
        /// Requested blur amount.
        blur: u32,
        /// Requested stroke amount.
        stroke: u32,
    },
    /// The kernel size exceeded the atlas texture size.
    KernelTooLarge {
        /// Requested kernel width.
        kernel_width: u32,
        /// Requested kernel height.
        kernel_height: u32,
        /// Atlas texture width.
        width: u32,
        /// Atlas texture height.
        height: u32,
    },
    /// Character or line spacing was not a finite number.
    InvalidSpacing,
    /// The padded glyph does not fit into an empty atlas.
    GlyphTooLarge {
        /// Padded glyph width.
        width: u32,
        /// Padded glyph height.
        height: u32,
        /// Width of a fresh atlas.
        atlas_width: u32,
        /// Height of a fresh atlas.
        atlas_height: u32,
    },
    /// The used space declared for an existing texture lies outside of it.
    UsedSpaceOutOfBounds {
        /// The declared used rectangle.
        used: AtlasRect,
        /// Width of the existing texture.
        width: u32,
        /// Height of the existing texture.
        height: u32,
    },
    /// A glyph key referred to a font source that was never added.
    FontIndexOutOfRange {
        /// The requested font index.
        index: u32,
        /// Number of registered sources.
        count: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTextureSize { width, height } => {
                write!(f, "invalid atlas texture size {width}x{height}")
            }
            Self::EffectAmountOutOfRange { amount } => write!(
                f,
                "effect amount {amount} out of range 0..={}",
                crate::MAX_EFFECT_AMOUNT
            ),
            Self::ConflictingEffects { blur, stroke } => write!(
                f,
                "cannot have both blur ({blur}) and stroke ({stroke})"
            ),
            Self::KernelTooLarge {
                kernel_width,
                kernel_height,
                width,
                height,
            } => write!(
                f,
                "kernel {kernel_width}x{kernel_height} exceeds atlas texture size {width}x{height}"
            ),
            Self::InvalidSpacing => f.write_str("character and line spacing must be finite"),
            Self::GlyphTooLarge {
                width,
                height,
                atlas_width,
                atlas_height,
            } => write!(
                f,
                "glyph bounds {width}x{height} exceed atlas capacity {atlas_width}x{atlas_height}"
            ),
            Self::UsedSpaceOutOfBounds {
                used,
                width,
                height,
            } => write!(
                f,
                "used space {}x{} at ({}, {}) exceeds existing texture {width}x{height}",
                used.width, used.height, used.x, used.y
            ),
            Self::FontIndexOutOfRange { index, count } => {
                write!(f, "font index {index} out of range for {count} sources")
            }
        }
    }
}

impl core::error::Error for Error {}
