// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use kurbo::{Rect, Vec2};

use crate::types::ItemId;

/// Container item.
///
/// Children are stored oldest first: drawing walks the list forwards so the
/// newest child paints on top, hit testing walks it backwards so the newest
/// child wins ties. The tree walks themselves live on
/// [`Canvas`](crate::Canvas), which owns the items.
#[derive(Clone, Debug, Default)]
pub struct Group {
    pub(crate) children: Vec<ItemId>,
    /// Translation applied to every child, in the parent's coordinates.
    pub offset: Vec2,
}

impl Group {
    /// Empty group without an offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty group whose children are drawn shifted by `offset`.
    pub fn with_offset(offset: Vec2) -> Self {
        Self {
            children: Vec::new(),
            offset,
        }
    }

    /// Children, oldest first.
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    /// Map a rectangle from child coordinates to this group's parent.
    pub fn adjust_bounds(&self, rect: Rect) -> Rect {
        rect + self.offset
    }

    pub(crate) fn remove_child(&mut self, id: ItemId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| *c != id);
        self.children.len() != before
    }
}
