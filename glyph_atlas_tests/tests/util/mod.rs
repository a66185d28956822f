// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod asserts;
mod backend;
mod source;

pub(crate) use asserts::assert_disjoint;
pub(crate) use backend::RecordingBackend;
pub(crate) use source::{SourceCalls, StubSource};

use glyph_atlas::{FontSystem, FontSystemSettings};

/// A font system over one stub source with every lowercase letter at
/// `width` × `height` pixels and an empty space.
pub(crate) fn letters_system(
    settings: FontSystemSettings,
    width: i32,
    height: i32,
) -> (FontSystem<usize>, SourceCalls) {
    let source = StubSource::letters(width, height);
    let calls = source.calls();
    let mut system = FontSystem::new(settings).unwrap();
    system.add_source(source);
    (system, calls)
}
