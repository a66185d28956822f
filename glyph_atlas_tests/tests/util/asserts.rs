// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Various helper functions to assert truths during testing.

use glyph_atlas::AtlasRect;

/// Assert that no two rectangles overlap and that all lie inside `width` × `height`.
pub(crate) fn assert_disjoint(rects: &[AtlasRect], width: u32, height: u32) {
    for (i, a) in rects.iter().enumerate() {
        assert!(
            a.right() <= width && a.bottom() <= height,
            "rect {i} {a:?} outside of {width}x{height}"
        );
        for (j, b) in rects.iter().enumerate().skip(i + 1) {
            assert!(!a.intersects(b), "rect {i} {a:?} overlaps rect {j} {b:?}");
        }
    }
}
