// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `glyph_atlas`.
//!
//! - The `util` module holds a call-counting stub glyph source and a texture
//!   backend that records every upload into in-memory pixels.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that the utilities are shared.
//! - Put the "topic" of a test at the start of its name, e.g. `overflow_keeps_old_glyphs`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod cache;
mod util;
