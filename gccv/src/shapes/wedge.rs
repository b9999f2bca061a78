// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Fill;

use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::{FillStyle, LineStyle};

/// Triangle outline shared by [`Wedge`] and [`Hash`]: `[narrow, wide_left, wide_right]`.
fn triangle(narrow: Point, wide: Point, width: f64) -> Option<[Point; 3]> {
    let axis = wide - narrow;
    let len = axis.hypot();
    if len.is_nan() || len <= 0.0 {
        return None;
    }
    let n = Vec2::new(-axis.y, axis.x) * (width.abs() / (2.0 * len));
    Some([narrow, wide + n, wide - n])
}

fn triangle_distance(narrow: Point, wide: Point, width: f64, pt: Point) -> f64 {
    match triangle(narrow, wide, width) {
        Some(tri) if geom::polygon_contains(&tri, pt) => 0.0,
        Some(tri) => geom::polyline_distance(&tri, true, pt),
        None => pt.distance(narrow),
    }
}

fn triangle_bounds(narrow: Point, wide: Point, width: f64) -> Rect {
    triangle(narrow, wide, width)
        .and_then(|tri| geom::points_bbox(&tri))
        .unwrap_or_else(|| Rect::from_points(narrow, narrow))
}

/// Solid wedge bond: a triangle from a point to a wide end.
#[derive(Clone, Debug)]
pub struct Wedge {
    /// Apex.
    pub narrow: Point,
    /// Midpoint of the wide end.
    pub wide: Point,
    /// Width at the wide end.
    pub width: f64,
    /// Supplies the color when the fill is unset; its width is unused.
    pub line: LineStyle,
    /// Fill; when unset the line color is used.
    pub fill: FillStyle,
}

impl Default for Wedge {
    fn default() -> Self {
        Self {
            narrow: Point::ZERO,
            wide: Point::ZERO,
            width: 4.0,
            line: LineStyle::default(),
            fill: FillStyle::default(),
        }
    }
}

impl Wedge {
    /// Wedge from `narrow` to `wide`.
    pub fn new(narrow: impl Into<Point>, wide: impl Into<Point>, width: f64) -> Self {
        Self {
            narrow: narrow.into(),
            wide: wide.into(),
            width,
            ..Default::default()
        }
    }

    /// Replace the geometry.
    pub fn set_position(&mut self, narrow: Point, wide: Point) {
        self.narrow = narrow;
        self.wide = wide;
    }

    pub(crate) fn bounds(&self) -> Rect {
        triangle_bounds(self.narrow, self.wide, self.width)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        triangle_distance(self.narrow, self.wide, self.width, pt)
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.narrow += delta;
        self.wide += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let Some(tri) = triangle(self.narrow, self.wide, self.width) else {
            return;
        };
        let color = if self.fill.is_filled() {
            self.fill.resolve(env)
        } else if self.line.auto_color {
            Some(env.foreground)
        } else {
            Some(self.line.color).filter(|c| !crate::render::is_transparent(*c))
        };
        if let Some(color) = color {
            ctx.fill(&geom::polygon_path(&tri), color, Fill::NonZero);
        }
    }
}

/// Hashed wedge bond: the wedge outline drawn as parallel strokes.
#[derive(Clone, Debug)]
pub struct Hash {
    /// Apex.
    pub narrow: Point,
    /// Midpoint of the wide end.
    pub wide: Point,
    /// Width at the wide end.
    pub width: f64,
    /// Distance between consecutive hatches.
    pub spacing: f64,
    /// Hatch stroke.
    pub line: LineStyle,
}

impl Default for Hash {
    fn default() -> Self {
        Self {
            narrow: Point::ZERO,
            wide: Point::ZERO,
            width: 4.0,
            spacing: 2.0,
            line: LineStyle::default(),
        }
    }
}

impl Hash {
    /// Hashed wedge from `narrow` to `wide`.
    pub fn new(narrow: impl Into<Point>, wide: impl Into<Point>, width: f64) -> Self {
        Self {
            narrow: narrow.into(),
            wide: wide.into(),
            width,
            ..Default::default()
        }
    }

    /// Replace the geometry.
    pub fn set_position(&mut self, narrow: Point, wide: Point) {
        self.narrow = narrow;
        self.wide = wide;
    }

    /// Hatch segments, starting with the one across the wide end.
    pub fn hatches(&self) -> Vec<(Point, Point)> {
        let Some([narrow, left, right]) = triangle(self.narrow, self.wide, self.width) else {
            return Vec::new();
        };
        let len = (self.wide - narrow).hypot();
        let step = self.line.width.max(0.0) + self.spacing.max(0.0);
        if step <= 0.0 {
            return alloc::vec![(left, right)];
        }
        let step = step.max(geom::FLATTEN_TOLERANCE);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Hatch counts are small and non-negative."
        )]
        let count = ((len / step).ceil() as usize).max(1);
        (0..count)
            .map(|i| {
                // Fraction of the way from the apex towards the wide end.
                let t = 1.0 - (i as f64 * step) / len;
                (narrow.lerp(left, t), narrow.lerp(right, t))
            })
            .collect()
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        triangle_bounds(self.narrow, self.wide, self.width).inflate(hw, hw)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        geom::minus_half_width(
            triangle_distance(self.narrow, self.wide, self.width, pt),
            self.line.half_width(),
        )
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.narrow += delta;
        self.wide += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let Some(color) = self.line.resolve(env) else {
            return;
        };
        let mut path = BezPath::new();
        for (a, b) in self.hatches() {
            path.move_to(a);
            path.line_to(b);
        }
        ctx.stroke(&path, &self.line.to_stroke(), color);
    }
}
