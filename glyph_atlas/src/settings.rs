// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::effect::{GlyphPostProcessor, GlyphRenderResult, render_default};
use crate::{Effect, Error, MAX_EFFECT_AMOUNT};

/// Configuration of a [`FontSystem`](crate::FontSystem).
///
/// Checked as a whole by [`validate`](Self::validate) when the font system
/// is created.
#[derive(Clone, Copy, Debug)]
pub struct FontSystemSettings {
    /// Width of newly created atlases.
    pub texture_width: u32,
    /// Height of newly created atlases.
    pub texture_height: u32,
    /// Blur radius baked into every glyph, `0..=20`.
    pub blur_amount: u8,
    /// Stroke width baked into every glyph, `0..=20`.
    ///
    /// Cannot be combined with `blur_amount`.
    pub stroke_amount: u8,
    /// Pixel convention of the atlas.
    pub glyph_render_result: GlyphRenderResult,
    /// Extra horizontal room reserved for every glyph, at most `texture_width`.
    pub kernel_width: u32,
    /// Extra vertical room reserved for every glyph, at most `texture_height`.
    pub kernel_height: u32,
    /// Substituted for codepoints that no source provides.
    pub default_character: Option<char>,
    /// Apply kerning between glyphs of the same source.
    pub use_kernings: bool,
    /// Extra advance between characters, in pixels.
    pub character_spacing: f32,
    /// Extra distance between lines, in pixels.
    pub line_spacing: f32,
    /// Converts glyph coverage into atlas pixels.
    pub post_processor: GlyphPostProcessor,
}

impl Default for FontSystemSettings {
    fn default() -> Self {
        Self {
            texture_width: 1024,
            texture_height: 1024,
            blur_amount: 0,
            stroke_amount: 0,
            glyph_render_result: GlyphRenderResult::Premultiplied,
            kernel_width: 0,
            kernel_height: 0,
            default_character: Some(' '),
            use_kernings: true,
            character_spacing: 0.0,
            line_spacing: 0.0,
            post_processor: render_default,
        }
    }
}

impl FontSystemSettings {
    /// The effect applied to glyphs requested by codepoint.
    pub fn effect(&self) -> Effect {
        if self.blur_amount > 0 {
            Effect::Blurry(self.blur_amount)
        } else if self.stroke_amount > 0 {
            Effect::Stroked(self.stroke_amount)
        } else {
            Effect::None
        }
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<(), Error> {
        check_texture_size(self.texture_width, self.texture_height)?;
        check_kernel_size(self, self.texture_width, self.texture_height)?;
        for amount in [self.blur_amount, self.stroke_amount] {
            check_effect_amount(amount)?;
        }
        if self.blur_amount > 0 && self.stroke_amount > 0 {
            return Err(Error::ConflictingEffects {
                blur: self.blur_amount.into(),
                stroke: self.stroke_amount.into(),
            });
        }
        if !self.character_spacing.is_finite() || !self.line_spacing.is_finite() {
            return Err(Error::InvalidSpacing);
        }
        Ok(())
    }
}

pub(crate) fn check_texture_size(width: u32, height: u32) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidTextureSize { width, height });
    }
    Ok(())
}

/// Checks the kernel of `settings` against atlases of `width` × `height`.
pub(crate) fn check_kernel_size(
    settings: &FontSystemSettings,
    width: u32,
    height: u32,
) -> Result<(), Error> {
    if settings.kernel_width > width || settings.kernel_height > height {
        return Err(Error::KernelTooLarge {
            kernel_width: settings.kernel_width,
            kernel_height: settings.kernel_height,
            width,
            height,
        });
    }
    Ok(())
}

pub(crate) fn check_effect_amount(amount: u8) -> Result<(), Error> {
    if amount > MAX_EFFECT_AMOUNT {
        return Err(Error::EffectAmountOutOfRange {
            amount: amount.into(),
        });
    }
    Ok(())
}
