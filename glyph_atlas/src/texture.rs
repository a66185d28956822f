// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::AtlasRect;

/// Creates atlas textures and writes pixels into them.
///
/// The atlas never owns GPU resources itself: it keeps whatever handle
/// [`create_texture`](Self::create_texture) returns and passes it back on
/// every upload. Dropping the handle is the only teardown it performs.
pub trait TextureBackend {
    /// Opaque texture handle.
    type Texture;

    /// Creates an RGBA8 texture of the given size.
    fn create_texture(&mut self, width: u32, height: u32) -> Self::Texture;

    /// Replaces the pixels of `rect` with `rgba` (tightly packed rows, 4 bytes per pixel).
    fn set_texture_data(&mut self, texture: &Self::Texture, rect: AtlasRect, rgba: &[u8]);
}
