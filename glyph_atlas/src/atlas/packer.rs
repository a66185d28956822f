// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Skyline rectangle packer.

use alloc::vec::Vec;

/// Initial node capacity of a packer. The node vector grows by doubling.
const INITIAL_NODE_CAPACITY: usize = 256;

/// One horizontal segment of the skyline.
///
/// Everything below `y` over `[x, x + width)` is occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkylineNode {
    /// Left edge of the segment.
    pub x: u32,
    /// Height of the skyline over this segment.
    pub y: u32,
    /// Width of the segment.
    pub width: u32,
}

/// Skyline bin packer over a fixed-size rectangle.
///
/// Nodes are kept sorted by `x`, contiguous and non-overlapping; the first
/// node always starts at `x == 0` and together they span the whole width.
#[derive(Clone, Debug)]
pub struct SkylinePacker {
    width: u32,
    height: u32,
    nodes: Vec<SkylineNode>,
}

impl SkylinePacker {
    /// Creates a packer with a single empty skyline level.
    pub fn new(width: u32, height: u32) -> Self {
        let mut nodes = Vec::with_capacity(INITIAL_NODE_CAPACITY);
        nodes.push(SkylineNode { x: 0, y: 0, width });
        Self {
            width,
            height,
            nodes,
        }
    }

    /// Forgets every placement and resizes the packer.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.nodes.clear();
        self.nodes.push(SkylineNode { x: 0, y: 0, width });
    }

    /// Width of the packed area.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the packed area.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The current skyline, left to right.
    #[inline]
    pub fn nodes(&self) -> &[SkylineNode] {
        &self.nodes
    }

    /// Returns `true` if nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].y == 0
    }

    /// Returns the `y` at which a `width` × `height` rectangle starting at
    /// node `index` would rest, or `None` if it does not fit there.
    pub fn rect_fits(&self, index: usize, width: u32, height: u32) -> Option<u32> {
        let start = self.nodes.get(index)?;
        if width > self.width.saturating_sub(start.x) {
            return None;
        }
        let mut y = start.y;
        let mut remaining = width;
        let mut i = index;
        while remaining > 0 {
            let node = self.nodes.get(i)?;
            y = y.max(node.y);
            if height > self.height.saturating_sub(y) {
                return None;
            }
            remaining = remaining.saturating_sub(node.width);
            i += 1;
        }
        Some(y)
    }

    /// Finds room for a `width` × `height` rectangle and commits it.
    ///
    /// Every node is tried as a start position; the one giving the lowest
    /// top edge wins, ties going to the narrower node. Returns the top-left
    /// corner, or `None` when the packer is full for this size.
    ///
    /// Zero-area rectangles are placed at the origin without changing the skyline.
    pub fn add_rect(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width == 0 || height == 0 {
            return Some((0, 0));
        }

        // (index, node width, top edge, x, y)
        let mut best: Option<(usize, u32, u32, u32, u32)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            let Some(y) = self.rect_fits(i, width, height) else {
                continue;
            };
            let top = y + height;
            let better = match best {
                None => true,
                Some((_, best_width, best_top, _, _)) => {
                    top < best_top || (top == best_top && node.width < best_width)
                }
            };
            if better {
                best = Some((i, node.width, top, node.x, y));
            }
        }

        let (index, _, _, x, y) = best?;
        self.add_skyline_level(index, x, y, width, height);
        Some((x, y))
    }

    /// Raises the skyline over `[x, x + width)` to `y + height`.
    ///
    /// The new node is inserted at `index`; nodes it covers are trimmed or
    /// removed, then neighbours at the same height are merged. Levels past
    /// `u32::MAX` saturate.
    pub fn add_skyline_level(&mut self, index: usize, x: u32, y: u32, width: u32, height: u32) {
        self.insert_node(
            index,
            SkylineNode {
                x,
                y: y.saturating_add(height),
                width,
            },
        );

        let mut i = index + 1;
        while i < self.nodes.len() {
            let previous = self.nodes[i - 1];
            let previous_end = previous.x.saturating_add(previous.width);
            let node = &mut self.nodes[i];
            if node.x >= previous_end {
                break;
            }
            let shrink = previous_end - node.x;
            if node.width <= shrink {
                self.remove_node(i);
                continue;
            }
            node.x += shrink;
            node.width -= shrink;
            break;
        }

        let mut i = 0;
        while i + 1 < self.nodes.len() {
            if self.nodes[i].y == self.nodes[i + 1].y {
                let merged = self.nodes[i + 1].width;
                self.nodes[i].width = self.nodes[i].width.saturating_add(merged);
                self.remove_node(i + 1);
            } else {
                i += 1;
            }
        }
    }

    pub(crate) fn insert_node(&mut self, index: usize, node: SkylineNode) {
        self.nodes.insert(index, node);
    }

    pub(crate) fn remove_node(&mut self, index: usize) {
        if index < self.nodes.len() {
            self.nodes.remove(index);
        }
    }
}
