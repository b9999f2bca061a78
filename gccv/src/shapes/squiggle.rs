// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{BezPath, Point, Rect, Vec2};

use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::LineStyle;

/// Wavy line between two points, used for bonds of undefined stereochemistry.
#[derive(Clone, Debug)]
pub struct Squiggle {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
    /// Peak-to-peak amplitude of the wave.
    pub width: f64,
    /// Wavelength, two half-waves.
    pub step: f64,
    /// Stroke.
    pub line: LineStyle,
}

impl Default for Squiggle {
    fn default() -> Self {
        Self {
            start: Point::ZERO,
            end: Point::ZERO,
            width: 4.0,
            step: 4.0,
            line: LineStyle::default(),
        }
    }
}

impl Squiggle {
    /// Squiggle from `start` to `end` with the default wave.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            ..Default::default()
        }
    }

    /// Replace both endpoints.
    pub fn set_position(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
    }

    /// The wave as a chain of half-wave cubics on alternating sides.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        let axis = self.end - self.start;
        let len = axis.hypot();
        if len.is_nan() || len <= 0.0 || self.step.is_nan() || self.step <= 0.0 {
            path.line_to(self.end);
            return path;
        }
        // Waves finer than the flattening tolerance are invisible anyway.
        let step = self.step.max(geom::FLATTEN_TOLERANCE);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Half-wave counts are small and non-negative."
        )]
        let count = ((2.0 * len / step).round() as usize).max(1);
        let u = axis / len;
        let half = len / count as f64;
        // A cubic whose controls sit at k off-axis peaks at 3k/4.
        let k = self.width.abs() / 2.0 * 4.0 / 3.0;
        let n = Vec2::new(-u.y, u.x);
        let mut a = self.start;
        for i in 0..count {
            let b = if i + 1 == count { self.end } else { a + u * half };
            let side = if i % 2 == 0 { 1.0 } else { -1.0 };
            let off = n * (k * side);
            path.curve_to(a + u * (half / 3.0) + off, b - u * (half / 3.0) + off, b);
            a = b;
        }
        path
    }

    fn reach(&self) -> f64 {
        self.width.abs() / 2.0 + self.line.half_width()
    }

    pub(crate) fn bounds(&self) -> Rect {
        let r = self.reach();
        Rect::from_points(self.start, self.end).inflate(r, r)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        geom::minus_half_width(geom::segment_distance(self.start, self.end, pt), self.reach())
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(&self.path(), &self.line.to_stroke(), color);
        }
    }
}
