// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered list of atlases.

use smallvec::SmallVec;

use super::page::{Atlas, check_used_space};
use super::region::{AtlasId, AtlasRect};
use crate::Error;

/// A texture supplied by the application to receive the first atlas.
///
/// `used` marks the part of the texture that already holds other pixels;
/// glyphs are packed around it.
#[derive(Clone, Debug)]
pub struct ExistingTexture<T> {
    texture: T,
    width: u32,
    height: u32,
    used: AtlasRect,
}

impl<T> ExistingTexture<T> {
    /// Describes an existing texture, rejecting a `used` rectangle that
    /// extends past it.
    pub fn new(texture: T, width: u32, height: u32, used: AtlasRect) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidTextureSize { width, height });
        }
        check_used_space(used, width, height)?;
        Ok(Self {
            texture,
            width,
            height,
            used,
        })
    }

    /// The texture handle.
    #[inline]
    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// Texture size.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The reserved rectangle.
    #[inline]
    pub fn used(&self) -> AtlasRect {
        self.used
    }
}

/// Every atlas created since the last clear, in creation order.
///
/// Glyphs are packed into the current atlas. When it fills up it is
/// discarded as "current" but kept in the list, since cached descriptors
/// still point into it.
pub struct AtlasProvider<T> {
    /// Uses `SmallVec` with inline capacity of 1 because most applications
    /// never outgrow their first atlas.
    atlases: SmallVec<[Atlas<T>; 1]>,
    current: Option<AtlasId>,
    width: u32,
    height: u32,
    existing: Option<ExistingTexture<T>>,
}

impl<T> AtlasProvider<T> {
    /// Creates a provider for atlases of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            atlases: SmallVec::new(),
            current: None,
            width,
            height,
            existing: None,
        }
    }

    /// Every atlas, oldest first. An [`AtlasId`] indexes this slice.
    #[inline]
    pub fn atlases(&self) -> &[Atlas<T>] {
        &self.atlases
    }

    /// Returns the atlas with the given id.
    #[inline]
    pub fn get(&self, id: AtlasId) -> Option<&Atlas<T>> {
        self.atlases.get(id.index())
    }

    /// Returns the atlas with the given id.
    #[inline]
    pub fn get_mut(&mut self, id: AtlasId) -> Option<&mut Atlas<T>> {
        self.atlases.get_mut(id.index())
    }

    /// The atlas glyphs are currently packed into, if any.
    #[inline]
    pub fn current(&self) -> Option<AtlasId> {
        self.current
    }

    /// Size of atlases created from scratch.
    #[inline]
    pub fn fresh_atlas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Size of the atlas the next glyph goes into.
    ///
    /// This is the current atlas, or the one [`current_atlas`](Self::current_atlas)
    /// would create: the existing texture while the list is empty, a fresh
    /// atlas otherwise.
    pub fn current_atlas_size(&self) -> (u32, u32) {
        if let Some(atlas) = self.current.and_then(|id| self.get(id)) {
            return (atlas.width(), atlas.height());
        }
        match &self.existing {
            Some(existing) if self.atlases.is_empty() => existing.size(),
            _ => self.fresh_atlas_size(),
        }
    }

    /// Makes the next [`current_atlas`](Self::current_atlas) call start a new atlas.
    pub fn discard_current(&mut self) {
        self.current = None;
    }

    /// Drops every atlas.
    ///
    /// The existing texture, if any, stays registered and seeds the next atlas.
    pub fn clear(&mut self) {
        self.current = None;
        self.atlases.clear();
    }

    /// Drops every atlas and changes the size of the ones created later.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.clear();
        self.width = width;
        self.height = height;
    }

    /// Registers a texture to seed the first atlas with, or removes it.
    ///
    /// Takes effect the next time the list is empty.
    pub fn set_existing_texture(&mut self, existing: Option<ExistingTexture<T>>) {
        self.existing = existing;
    }

    /// The registered existing texture.
    #[inline]
    pub fn existing_texture(&self) -> Option<&ExistingTexture<T>> {
        self.existing.as_ref()
    }
}

impl<T: Clone> AtlasProvider<T> {
    /// Returns the current atlas, creating one if there is none.
    pub fn current_atlas(&mut self) -> (AtlasId, &mut Atlas<T>) {
        let id = match self.current {
            Some(id) => id,
            None => self.create_new_atlas(),
        };
        let index = id.index();
        (id, &mut self.atlases[index])
    }

    /// Appends a new atlas and makes it current.
    ///
    /// The first atlas of the list is built on the existing texture when one
    /// is registered; every other atlas starts empty at the configured size.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "atlas counts stay far below u32::MAX"
    )]
    pub fn create_new_atlas(&mut self) -> AtlasId {
        let atlas = match &self.existing {
            Some(existing) if self.atlases.is_empty() => {
                log::debug!(
                    "Creating atlas on existing {}x{} texture",
                    existing.width,
                    existing.height
                );
                Atlas::seeded(
                    existing.texture.clone(),
                    existing.width,
                    existing.height,
                    existing.used,
                )
            }
            _ => {
                log::debug!("Creating {}x{} atlas", self.width, self.height);
                Atlas::new(self.width, self.height)
            }
        };
        let id = AtlasId(self.atlases.len() as u32);
        self.atlases.push(atlas);
        self.current = Some(id);
        id
    }
}

impl<T> core::fmt::Debug for AtlasProvider<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AtlasProvider")
            .field("atlases", &self.atlases.len())
            .field("current", &self.current)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("existing", &self.existing.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkylineNode;

    #[test]
    fn current_atlas_is_created_lazily() {
        let mut provider = AtlasProvider::<u32>::new(64, 64);
        assert!(provider.atlases().is_empty());
        assert_eq!(provider.current(), None);
        let (id, atlas) = provider.current_atlas();
        assert_eq!(id, AtlasId(0));
        assert_eq!((atlas.width(), atlas.height()), (64, 64));
        let (again, _) = provider.current_atlas();
        assert_eq!(again, id);
        assert_eq!(provider.atlases().len(), 1);
    }

    #[test]
    fn discarded_atlases_are_retained() {
        let mut provider = AtlasProvider::<u32>::new(64, 64);
        let (first, atlas) = provider.current_atlas();
        atlas.add_rect(10, 10).unwrap();
        provider.discard_current();
        let (second, _) = provider.current_atlas();
        assert_ne!(first, second);
        assert_eq!(provider.atlases().len(), 2);
        assert!(!provider.get(first).unwrap().packer().is_empty());
    }

    #[test]
    fn create_new_atlas_always_appends() {
        let mut provider = AtlasProvider::<u32>::new(16, 16);
        let a = provider.create_new_atlas();
        let b = provider.create_new_atlas();
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(provider.current(), Some(b));
    }

    #[test]
    fn existing_texture_seeds_only_the_first_atlas() {
        let mut provider = AtlasProvider::new(64, 64);
        let existing = ExistingTexture::new(42_u32, 128, 32, AtlasRect::new(0, 0, 128, 8)).unwrap();
        provider.set_existing_texture(Some(existing));

        let (_, first) = provider.current_atlas();
        assert_eq!(first.texture(), Some(&42));
        assert_eq!((first.width(), first.height()), (128, 32));
        assert_eq!(first.packer().nodes(), &[SkylineNode { x: 0, y: 8, width: 128 }]);

        provider.discard_current();
        let (_, second) = provider.current_atlas();
        assert!(second.texture().is_none());
        assert_eq!((second.width(), second.height()), (64, 64));

        provider.clear();
        let (_, reseeded) = provider.current_atlas();
        assert_eq!(reseeded.texture(), Some(&42));
    }

    #[test]
    fn existing_texture_validates_used_space() {
        assert!(matches!(
            ExistingTexture::new(0_u32, 32, 32, AtlasRect::new(0, 30, 8, 8)),
            Err(Error::UsedSpaceOutOfBounds { .. })
        ));
        assert!(matches!(
            ExistingTexture::new(0_u32, 0, 32, AtlasRect::default()),
            Err(Error::InvalidTextureSize { .. })
        ));
    }

    #[test]
    fn current_atlas_size_follows_the_next_atlas() {
        let mut provider = AtlasProvider::new(64, 64);
        assert_eq!(provider.current_atlas_size(), (64, 64));
        let existing = ExistingTexture::new(7_u32, 256, 128, AtlasRect::default()).unwrap();
        provider.set_existing_texture(Some(existing));
        assert_eq!(provider.current_atlas_size(), (256, 128));
        provider.current_atlas();
        assert_eq!(provider.current_atlas_size(), (256, 128));
        provider.discard_current();
        assert_eq!(provider.current_atlas_size(), (64, 64));
    }

    #[test]
    fn set_size_clears() {
        let mut provider = AtlasProvider::<u32>::new(64, 64);
        provider.current_atlas();
        provider.set_size(32, 16);
        assert!(provider.atlases().is_empty());
        assert_eq!(provider.fresh_atlas_size(), (32, 16));
    }
}
