// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A texture backend that keeps textures as plain RGBA byte vectors.

use glyph_atlas::{AtlasRect, TextureBackend};

#[derive(Debug)]
struct Texture {
    width: u32,
    pixels: Vec<u8>,
}

/// Texture handles are indices into the backend's texture list.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    textures: Vec<Texture>,
    uploads: Vec<(usize, AtlasRect)>,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Every upload so far, as `(texture, rect)`.
    pub(crate) fn uploads(&self) -> &[(usize, AtlasRect)] {
        &self.uploads
    }

    /// The RGBA bytes of `rect`, row by row.
    pub(crate) fn region(&self, texture: usize, rect: AtlasRect) -> Vec<u8> {
        let texture = &self.textures[texture];
        let mut out = Vec::with_capacity((rect.width * rect.height * 4) as usize);
        for y in rect.y..rect.bottom() {
            let start = ((y * texture.width + rect.x) * 4) as usize;
            out.extend_from_slice(&texture.pixels[start..start + rect.width as usize * 4]);
        }
        out
    }

    /// Fills a whole texture with one pixel value.
    pub(crate) fn fill(&mut self, texture: usize, pixel: [u8; 4]) {
        for chunk in self.textures[texture].pixels.chunks_mut(4) {
            chunk.copy_from_slice(&pixel);
        }
    }
}

impl TextureBackend for RecordingBackend {
    type Texture = usize;

    fn create_texture(&mut self, width: u32, height: u32) -> usize {
        self.textures.push(Texture {
            width,
            pixels: vec![0; (width * height * 4) as usize],
        });
        self.textures.len() - 1
    }

    fn set_texture_data(&mut self, texture: &usize, rect: AtlasRect, rgba: &[u8]) {
        assert_eq!(
            rgba.len(),
            (rect.width * rect.height * 4) as usize,
            "upload size does not match its rectangle"
        );
        self.uploads.push((*texture, rect));
        let target = &mut self.textures[*texture];
        let row_len = rect.width as usize * 4;
        for (row, y) in rgba.chunks(row_len).zip(rect.y..) {
            let start = ((y * target.width + rect.x) * 4) as usize;
            target.pixels[start..start + row_len].copy_from_slice(row);
        }
    }
}
