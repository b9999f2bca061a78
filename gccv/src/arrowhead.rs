// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrowhead decorations for directed endpoints.
//!
//! Every directional shape ([`Arrow`](crate::shapes::Arrow),
//! [`BezierArrow`](crate::shapes::BezierArrow), [`Arc`](crate::shapes::Arc))
//! decorates its ends through [`Head::at`]: given the tip and the direction of
//! travel at the tip, it builds a small polygon in the local frame of that
//! direction.
//!
//! ```text
//!            b
//!      |<--------->|
//!      *  (barb)   |          ^
//!       \  \       |          | c
//! ---------*-------* tip      v
//!       /  neck
//!      *
//!      |<-- a -->|
//! ```

use alloc::vec::Vec;
use kurbo::{BezPath, Point, Rect, Vec2};

use crate::geom;

/// Kind of decoration at an arrow end.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ArrowHead {
    /// Plain end.
    #[default]
    None,
    /// Symmetric head.
    Full,
    /// Half head on the left of the direction of travel.
    Left,
    /// Half head on the right of the direction of travel.
    Right,
}

/// Arrowhead proportions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrowHeadSize {
    /// Distance from the tip to the neck, where the shaft meets the head.
    pub a: f64,
    /// Distance from the tip to the barbs, along the shaft.
    pub b: f64,
    /// Distance of the barbs from the shaft axis.
    pub c: f64,
}

impl Default for ArrowHeadSize {
    fn default() -> Self {
        Self {
            a: 6.0,
            b: 8.0,
            c: 4.0,
        }
    }
}

/// A built arrowhead polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Head {
    /// Closed outline, starting at the tip.
    pub points: Vec<Point>,
    /// Point on the axis where the shaft should end.
    pub neck: Point,
}

impl Head {
    /// Build the decoration for `kind` at `tip`, travelling along `direction`.
    ///
    /// Returns `None` for [`ArrowHead::None`] or when the direction is degenerate.
    pub fn at(tip: Point, direction: Vec2, kind: ArrowHead, size: ArrowHeadSize) -> Option<Self> {
        let len = direction.hypot();
        if kind == ArrowHead::None || !len.is_finite() || len <= 0.0 {
            return None;
        }
        let u = direction / len;
        // Left of travel in a y-down coordinate system.
        let n = Vec2::new(u.y, -u.x);
        let neck = tip - u * size.a;
        let back = tip - u * size.b;
        let left = back + n * size.c;
        let right = back - n * size.c;
        let points = match kind {
            ArrowHead::Full => alloc::vec![tip, left, neck, right],
            ArrowHead::Left => alloc::vec![tip, left, neck],
            ArrowHead::Right => alloc::vec![tip, neck, right],
            ArrowHead::None => return None,
        };
        Some(Self { points, neck })
    }

    /// Bounding box of the outline.
    pub fn bounds(&self) -> Rect {
        geom::points_bbox(&self.points).unwrap_or(Rect::ZERO)
    }

    /// Distance from `pt` to the head, zero inside.
    pub fn distance(&self, pt: Point) -> f64 {
        if geom::polygon_contains(&self.points, pt) {
            0.0
        } else {
            geom::polyline_distance(&self.points, true, pt)
        }
    }

    /// Outline as a closed path.
    pub fn path(&self) -> BezPath {
        geom::polygon_path(&self.points)
    }
}
