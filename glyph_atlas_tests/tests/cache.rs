// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph cache behaviour seen through the font system.

use glyph_atlas::{Effect, FontSystemSettings, GlyphKey};

use crate::util::{RecordingBackend, letters_system};

fn no_default() -> FontSystemSettings {
    FontSystemSettings {
        default_character: None,
        ..Default::default()
    }
}

#[test]
fn cache_second_request_is_identical() {
    let (mut system, calls) = letters_system(FontSystemSettings::default(), 8, 10);
    let mut backend = RecordingBackend::new();
    let key = system.key('g', 16);

    let first = system.glyph(key, &mut backend).unwrap().unwrap();
    let uploads = backend.uploads().len();
    let second = system.glyph(key, &mut backend).unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.atlas, second.atlas);
    assert_eq!(calls.rasterize(), 1);
    assert_eq!(backend.uploads().len(), uploads);
    assert_eq!(system.stats().cache_hits, 1);
}

#[test]
fn cache_missing_codepoint_is_looked_up_once() {
    let (mut system, calls) = letters_system(no_default(), 8, 10);
    let mut backend = RecordingBackend::new();
    let key = system.key('#', 16);

    assert_eq!(system.glyph(key, &mut backend).unwrap(), None);
    assert_eq!(system.glyph(key, &mut backend).unwrap(), None);
    assert_eq!(system.glyph_metrics(key).unwrap(), None);
    assert_eq!(calls.glyph_id(), 1);
    assert_eq!(system.stats().negative_entries, 1);
    assert!(system.atlases().is_empty());
}

#[test]
fn cache_missing_codepoint_is_per_size() {
    let (mut system, calls) = letters_system(no_default(), 8, 10);
    for size in [12, 16, 12, 16] {
        assert_eq!(system.glyph_metrics(system.key('#', size)).unwrap(), None);
    }
    assert_eq!(calls.glyph_id(), 2);
}

#[test]
fn cache_default_character_replaces_missing_glyph() {
    let (mut system, calls) = letters_system(
        FontSystemSettings {
            default_character: Some('x'),
            ..Default::default()
        },
        8,
        10,
    );
    let mut backend = RecordingBackend::new();

    let glyph = system
        .glyph(system.key('#', 16), &mut backend)
        .unwrap()
        .unwrap();
    assert_eq!(glyph.codepoint, Some('x'));
    let direct = system
        .glyph(system.key('x', 16), &mut backend)
        .unwrap()
        .unwrap();
    assert_eq!(glyph, direct);

    let _ = system.glyph(system.key('#', 16), &mut backend).unwrap();
    // '#' once, 'x' once.
    assert_eq!(calls.glyph_id(), 2);
    assert_eq!(calls.rasterize(), 1);
}

#[test]
fn cache_missing_default_character_gives_none() {
    let (mut system, calls) = letters_system(
        FontSystemSettings {
            default_character: Some('#'),
            ..Default::default()
        },
        8,
        10,
    );
    assert_eq!(system.glyph_metrics(system.key('$', 16)).unwrap(), None);
    assert_eq!(system.glyph_metrics(system.key('#', 16)).unwrap(), None);
    assert_eq!(calls.glyph_id(), 2);
}

#[test]
fn cache_space_is_not_rendered() {
    let (mut system, calls) = letters_system(FontSystemSettings::default(), 8, 10);
    let mut backend = RecordingBackend::new();
    let glyph = system
        .glyph(system.key(' ', 16), &mut backend)
        .unwrap()
        .unwrap();
    assert!(glyph.is_empty());
    assert_eq!(glyph.atlas, None);
    assert_eq!(glyph.x_advance, 4);
    assert_eq!(calls.rasterize(), 0);
    assert!(backend.uploads().is_empty());
    assert!(system.atlases().is_empty());
}

#[test]
fn cache_metrics_do_not_render() {
    let (mut system, calls) = letters_system(FontSystemSettings::default(), 8, 10);
    for c in 'a'..='z' {
        let glyph = system.glyph_metrics(system.key(c, 16)).unwrap().unwrap();
        assert_eq!(glyph.atlas, None);
        assert_eq!((glyph.bounds.x, glyph.bounds.y), (0, 0));
    }
    assert_eq!(calls.rasterize(), 0);
    assert_eq!(calls.metrics(), 26);
    assert!(system.atlases().is_empty());
    assert_eq!(system.stats().metrics_entries, 26);
}

#[test]
fn cache_effects_are_separate_entries() {
    let (mut system, calls) = letters_system(FontSystemSettings::default(), 8, 10);
    let mut backend = RecordingBackend::new();
    let plain = GlyphKey::codepoint('a', 16, Effect::None);
    let blurred = GlyphKey::codepoint('a', 16, Effect::Blurry(2));
    let a = system.glyph(plain, &mut backend).unwrap().unwrap();
    let b = system.glyph(blurred, &mut backend).unwrap().unwrap();
    assert_ne!(a.bounds, b.bounds);
    assert_eq!(b.bounds.width, a.bounds.width + 4);
    assert_eq!(calls.rasterize(), 2);
}

#[test]
fn cache_reset_forgets_everything() {
    let (mut system, calls) = letters_system(no_default(), 8, 10);
    let mut backend = RecordingBackend::new();
    system.glyph(system.key('a', 16), &mut backend).unwrap();
    system.glyph(system.key('#', 16), &mut backend).unwrap();
    assert_eq!(calls.glyph_id(), 2);

    system.reset();
    assert!(system.atlases().is_empty());
    assert_eq!(system.stats().rendered_entries, 0);

    let again = system
        .glyph(system.key('a', 16), &mut backend)
        .unwrap()
        .unwrap();
    system.glyph(system.key('#', 16), &mut backend).unwrap();
    assert_eq!(calls.glyph_id(), 4);
    assert_eq!(calls.rasterize(), 2);
    assert_eq!(again.atlas.unwrap().index(), 0);
    // The reset atlas got a fresh texture.
    assert_eq!(backend.texture_count(), 2);
}
