// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning 8-bit glyph coverage into RGBA atlas pixels.
//!
//! [`render_default`] is the post-processor used unless
//! [`FontSystemSettings::post_processor`](crate::FontSystemSettings::post_processor)
//! says otherwise. It supports three effects:
//!
//! - [`Effect::None`]: the coverage becomes white (or premultiplied white).
//! - [`Effect::Blurry`]: a recursive exponential filter run twice in each
//!   direction approximates a Gaussian blur.
//! - [`Effect::Stroked`]: a black outline is synthesised from the coverage
//!   of the four neighbours `amount` pixels away and composited under the fill.
//!
//! All arithmetic is integer fixed point so that atlases are reproducible
//! bit for bit.

#[cfg(not(feature = "std"))]
use core_maths::CoreFloat as _;

use crate::Effect;

/// How coverage is converted into RGBA.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GlyphRenderResult {
    /// Every channel holds the coverage: `{c, c, c, c}`.
    #[default]
    Premultiplied,
    /// White with coverage as alpha: `{255, 255, 255, c}`.
    NonPremultiplied,
    /// Premultiplied, then every channel snapped to 0 or 255.
    NoAntialiasing,
}

/// Parameters of a post-processing call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphRenderOptions {
    /// Effect to apply.
    pub effect: Effect,
    /// Bitmap width in pixels.
    pub width: usize,
    /// Bitmap height in pixels.
    pub height: usize,
    /// Output pixel convention.
    pub render_result: GlyphRenderResult,
}

impl GlyphRenderOptions {
    #[inline]
    fn premultiply(&self) -> bool {
        self.render_result != GlyphRenderResult::NonPremultiplied
    }
}

/// Converts `width × height` coverage bytes into `4 × width × height` RGBA bytes.
///
/// The coverage buffer may be modified in place (the blur does so).
pub type GlyphPostProcessor = fn(coverage: &mut [u8], rgba: &mut [u8], options: &GlyphRenderOptions);

/// Coverage at or above this value survives [`GlyphRenderResult::NoAntialiasing`].
const ALIASED_THRESHOLD: u8 = 128;

/// The stock post-processor.
pub fn render_default(coverage: &mut [u8], rgba: &mut [u8], options: &GlyphRenderOptions) {
    let len = options.width * options.height;
    let coverage = &mut coverage[..len];
    let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut rgba[..len * 4]);

    match options.effect {
        Effect::Stroked(amount) if amount > 0 => {
            stroke(coverage, pixels, options.width, usize::from(amount), options.premultiply());
        }
        effect => {
            if let Effect::Blurry(amount) = effect {
                blur(coverage, options.width, options.height, options.width, amount);
            }
            let premultiply = options.premultiply();
            for (pixel, &c) in pixels.iter_mut().zip(coverage.iter()) {
                *pixel = if premultiply {
                    [c, c, c, c]
                } else {
                    [255, 255, 255, c]
                };
            }
        }
    }

    if options.render_result == GlyphRenderResult::NoAntialiasing {
        for channel in pixels.iter_mut().flatten() {
            *channel = if *channel >= ALIASED_THRESHOLD { 255 } else { 0 };
        }
    }
}

#[inline]
fn composite(black: i32, d: u8) -> i32 {
    let d = i32::from(d);
    ((255 - d) * black + 255 * d) / 255
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "composited values stay within 0..=255"
)]
fn stroke(coverage: &[u8], pixels: &mut [[u8; 4]], width: usize, amount: usize, premultiply: bool) {
    let len = coverage.len();
    let top = width * amount;
    let bottom = len.saturating_sub(top);
    let left = amount;
    let right = width.saturating_sub(amount);

    for (i, pixel) in pixels.iter_mut().enumerate() {
        let col = coverage[i];
        if col == 255 {
            *pixel = [255; 4];
            continue;
        }

        let column = i % width;
        let mut black = 0_i32;
        if i >= top {
            black = i32::from(coverage[i - top]);
        }
        if i < bottom {
            black = composite(black, coverage[i + top]);
        }
        if column >= left {
            black = composite(black, coverage[i - amount]);
        }
        if column < right {
            black = composite(black, coverage[i + amount]);
        }

        *pixel = match (black, col) {
            (0, 0) => [0; 4],
            (0, c) if premultiply => [c; 4],
            (0, c) => [255, 255, 255, c],
            (b, 0) => [0, 0, 0, b as u8],
            (b, c) => {
                let alpha = composite(b, c);
                if premultiply {
                    let v = (alpha * i32::from(c) / 255) as u8;
                    [v, v, v, alpha as u8]
                } else {
                    [c, c, c, alpha as u8]
                }
            }
        };
    }
}

/// Blurs `w × h` bytes of `dst` (rows `stride` apart) in place.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the filter coefficient is below 1 << 16"
)]
pub(crate) fn blur(dst: &mut [u8], w: usize, h: usize, stride: usize, amount: u8) {
    if amount < 1 || w == 0 || h == 0 {
        return;
    }
    let sigma = f32::from(amount) * 0.57735;
    let alpha = ((1 << 16) as f32 * (1.0 - (-2.3 / (sigma + 1.0)).exp())) as i32;
    blur_rows(dst, w, h, stride, alpha);
    blur_cols(dst, w, h, stride, alpha);
    blur_rows(dst, w, h, stride, alpha);
    blur_cols(dst, w, h, stride, alpha);
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "the accumulator tracks a byte value shifted left by 7"
)]
fn blur_step(z: &mut i32, value: &mut u8, alpha: i32) {
    *z += (alpha * ((i32::from(*value) << 7) - *z)) >> 16;
    *value = (*z >> 7) as u8;
}

/// Runs the filter horizontally along every row, both directions.
fn blur_cols(dst: &mut [u8], w: usize, h: usize, stride: usize, alpha: i32) {
    for y in 0..h {
        let row = &mut dst[y * stride..y * stride + w];
        let mut z = 0;
        for value in row[1..].iter_mut() {
            blur_step(&mut z, value, alpha);
        }
        row[w - 1] = 0;
        let mut z = 0;
        for value in row[..w - 1].iter_mut().rev() {
            blur_step(&mut z, value, alpha);
        }
        row[0] = 0;
    }
}

/// Runs the filter vertically along every column, both directions.
fn blur_rows(dst: &mut [u8], w: usize, h: usize, stride: usize, alpha: i32) {
    for x in 0..w {
        let mut z = 0;
        for y in 1..h {
            blur_step(&mut z, &mut dst[x + y * stride], alpha);
        }
        dst[x + (h - 1) * stride] = 0;
        let mut z = 0;
        for y in (0..h - 1).rev() {
            blur_step(&mut z, &mut dst[x + y * stride], alpha);
        }
        dst[x] = 0;
    }
}
