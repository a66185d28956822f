// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph cache key.

/// Largest blur or stroke amount accepted.
pub const MAX_EFFECT_AMOUNT: u8 = 20;

/// Visual effect baked into a glyph bitmap.
///
/// The amount is in pixels. An amount of zero is the same as [`Effect::None`];
/// keys are normalised so both hit the same cache entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Plain coverage.
    #[default]
    None,
    /// Gaussian-like blur.
    Blurry(u8),
    /// Black outline around the glyph.
    Stroked(u8),
}

impl Effect {
    /// The effect amount, zero for [`Effect::None`].
    #[inline]
    pub fn amount(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Blurry(amount) | Self::Stroked(amount) => amount,
        }
    }

    /// Maps zero amounts to [`Effect::None`].
    #[inline]
    pub fn normalized(self) -> Self {
        if self.amount() == 0 { Self::None } else { self }
    }

    /// Padding added on each side of a glyph bitmap to make room for the effect.
    ///
    /// Two pixels of padding are always kept so that bilinear sampling never
    /// reads a neighbouring glyph.
    #[inline]
    pub fn padding(self) -> u32 {
        pad_from_blur(self.amount())
    }
}

#[inline]
fn pad_from_blur(amount: u8) -> u32 {
    u32::from(amount) + 2
}

/// What a [`GlyphKey`] refers to within a font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphRef {
    /// A Unicode scalar value, resolved through the font sources in order.
    Codepoint(char),
    /// A glyph index, as produced by a shaper.
    GlyphId(u32),
}

/// Unique identifier for a cached glyph render.
///
/// Two requests with equal keys share the same cached metrics and bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    /// Codepoint or glyph id.
    pub glyph: GlyphRef,
    /// Glyph source index for [`GlyphRef::GlyphId`]; ignored for codepoints.
    pub font_index: u32,
    /// Pixel size.
    pub size: u32,
    /// Effect applied to the bitmap.
    pub effect: Effect,
}

impl GlyphKey {
    /// Key for a codepoint, searched in every glyph source.
    #[inline]
    pub fn codepoint(codepoint: char, size: u32, effect: Effect) -> Self {
        Self {
            glyph: GlyphRef::Codepoint(codepoint),
            font_index: 0,
            size,
            effect,
        }
        .normalized()
    }

    /// Key for a glyph index within a specific glyph source.
    #[inline]
    pub fn glyph_id(font_index: u32, glyph_id: u32, size: u32, effect: Effect) -> Self {
        Self {
            glyph: GlyphRef::GlyphId(glyph_id),
            font_index,
            size,
            effect,
        }
        .normalized()
    }

    /// Returns the key with its effect normalised and, for codepoints, the
    /// font index cleared.
    pub fn normalized(self) -> Self {
        let font_index = match self.glyph {
            GlyphRef::Codepoint(_) => 0,
            GlyphRef::GlyphId(_) => self.font_index,
        };
        Self {
            font_index,
            effect: self.effect.normalized(),
            ..self
        }
    }

    /// Same key with another codepoint, used for the default character.
    #[inline]
    pub(crate) fn with_codepoint(self, codepoint: char) -> Self {
        Self {
            glyph: GlyphRef::Codepoint(codepoint),
            font_index: 0,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_is_no_effect() {
        assert_eq!(Effect::Blurry(0).normalized(), Effect::None);
        assert_eq!(Effect::Stroked(0).normalized(), Effect::None);
        assert_eq!(Effect::Stroked(2).normalized(), Effect::Stroked(2));
    }

    #[test]
    fn padding_from_amount() {
        assert_eq!(Effect::None.padding(), 2);
        assert_eq!(Effect::Blurry(3).padding(), 5);
        assert_eq!(Effect::Stroked(20).padding(), 22);
    }

    #[test]
    fn codepoint_keys_ignore_font_index() {
        let a = GlyphKey::codepoint('a', 16, Effect::Blurry(0));
        let b = GlyphKey {
            font_index: 3,
            ..a
        };
        assert_eq!(a, b.normalized());
        assert_eq!(a.effect, Effect::None);
    }

    #[test]
    fn glyph_id_keys_keep_font_index() {
        let a = GlyphKey::glyph_id(1, 42, 16, Effect::None);
        let b = GlyphKey::glyph_id(2, 42, 16, Effect::None);
        assert_ne!(a, b);
    }

    #[test]
    fn effects_split_the_key_space() {
        let plain = GlyphKey::codepoint('a', 16, Effect::None);
        let blurred = GlyphKey::codepoint('a', 16, Effect::Blurry(2));
        let stroked = GlyphKey::codepoint('a', 16, Effect::Stroked(2));
        assert_ne!(plain, blurred);
        assert_ne!(blurred, stroked);
    }
}
