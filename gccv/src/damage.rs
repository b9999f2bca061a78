// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repaint requests accumulated by the canvas until the host drains them.

use alloc::vec::Vec;
use kurbo::Rect;

/// Pixel-space regions that need repainting.
///
/// Filled by [`Canvas::invalidate_rect`](crate::Canvas::invalidate_rect) and item
/// invalidation, drained with [`Canvas::take_damage`](crate::Canvas::take_damage).
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Rectangles in physical (zoomed) coordinates, in request order.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// True if nothing needs repainting.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    pub(crate) fn push(&mut self, rect: Rect) {
        self.dirty_rects.push(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_empty_is_none() {
        assert!(Damage::default().union_rect().is_none());
    }

    #[test]
    fn union_covers_all_rects() {
        let mut damage = Damage::default();
        damage.push(Rect::new(0.0, 0.0, 10.0, 10.0));
        damage.push(Rect::new(20.0, 5.0, 30.0, 40.0));
        assert_eq!(damage.union_rect(), Some(Rect::new(0.0, 0.0, 30.0, 40.0)));
        assert!(!damage.is_empty());
    }
}
