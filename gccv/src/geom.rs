// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance helpers shared by the shape implementations.
//!
//! All functions are total: empty inputs produce [`f64::INFINITY`], degenerate
//! segments collapse to point distances.

use core::f64::consts::TAU;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{BezPath, PathEl, Point, Rect, Shape as _};

/// Tolerance used when flattening curves for distance queries and bounds.
pub(crate) const FLATTEN_TOLERANCE: f64 = 0.1;

/// Distance from `pt` to the segment `p0`..`p1`.
///
/// Points before the start or after the end measure to the nearest endpoint.
pub(crate) fn segment_distance(p0: Point, p1: Point, pt: Point) -> f64 {
    let v = p1 - p0;
    let w = pt - p0;
    let len2 = v.hypot2();
    let t = if len2 > 0.0 { w.dot(v) / len2 } else { 0.0 };
    let t = t.clamp(0.0, 1.0);
    pt.distance(p0 + v * t)
}

/// Distance from `pt` to a chain of segments through `points`.
pub(crate) fn polyline_distance(points: &[Point], closed: bool, pt: Point) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => pt.distance(*single),
        _ => {
            let mut best = points
                .windows(2)
                .map(|w| segment_distance(w[0], w[1], pt))
                .fold(f64::INFINITY, f64::min);
            if closed {
                let last = points[points.len() - 1];
                best = best.min(segment_distance(last, points[0], pt));
            }
            best
        }
    }
}

/// Distance from `pt` to the outline of `path`, using a flattened approximation.
pub(crate) fn path_outline_distance(path: &BezPath, pt: Point) -> f64 {
    let mut best = f64::INFINITY;
    let mut start = None;
    let mut last = None;
    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            if let Some(s) = start.filter(|s| Some(*s) == last) {
                best = best.min(pt.distance(s));
            }
            start = Some(p);
            last = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(l) = last {
                best = best.min(segment_distance(l, p, pt));
            }
            last = Some(p);
        }
        PathEl::ClosePath => {
            if let (Some(s), Some(l)) = (start, last) {
                best = best.min(segment_distance(l, s, pt));
            }
            last = start;
        }
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    if best.is_infinite() {
        // A lone move-to still has a location.
        if let Some(s) = start {
            best = pt.distance(s);
        }
    }
    best
}

/// Distance from `pt` to the border of `rect`, measured from inside or outside.
pub(crate) fn rect_edge_distance(rect: Rect, pt: Point) -> f64 {
    if rect.contains(pt) {
        let dx = (pt.x - rect.x0).min(rect.x1 - pt.x);
        let dy = (pt.y - rect.y0).min(rect.y1 - pt.y);
        dx.min(dy).max(0.0)
    } else {
        rect_outside_distance(rect, pt)
    }
}

/// Euclidean distance from `pt` to `rect`; zero inside.
pub(crate) fn rect_outside_distance(rect: Rect, pt: Point) -> f64 {
    let dx = (rect.x0 - pt.x).max(0.0).max(pt.x - rect.x1);
    let dy = (rect.y0 - pt.y).max(0.0).max(pt.y - rect.y1);
    (dx * dx + dy * dy).sqrt()
}

/// Subtract a stroke half-width, flooring at zero. Infinite stays infinite.
pub(crate) fn minus_half_width(distance: f64, half_width: f64) -> f64 {
    if distance.is_infinite() {
        distance
    } else {
        (distance - half_width).max(0.0)
    }
}

/// Closed polygon through `points` as a path.
pub(crate) fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter().copied();
    if let Some(first) = it.next() {
        path.move_to(first);
        for p in it {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

/// Open chain through `points` as a path.
pub(crate) fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter().copied();
    if let Some(first) = it.next() {
        path.move_to(first);
        for p in it {
            path.line_to(p);
        }
    }
    path
}

/// Axis-aligned box around `points`; `None` when empty.
pub(crate) fn points_bbox(points: &[Point]) -> Option<Rect> {
    let mut it = points.iter().copied();
    let first = it.next()?;
    Some(it.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

/// Non-zero winding containment for a closed polygon.
pub(crate) fn polygon_contains(points: &[Point], pt: Point) -> bool {
    points.len() >= 3 && polygon_path(points).contains(pt)
}

/// Normalize an angle into `[0, TAU)`.
pub(crate) fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 { a + TAU } else { a }
}

/// True if `angle` lies on the sweep starting at `start` (signed `sweep`).
pub(crate) fn angle_in_sweep(angle: f64, start: f64, sweep: f64) -> bool {
    if sweep.abs() >= TAU {
        return true;
    }
    if sweep >= 0.0 {
        normalize_angle(angle - start) <= sweep
    } else {
        normalize_angle(start - angle) <= -sweep
    }
}
