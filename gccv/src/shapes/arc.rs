// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::FRAC_PI_2;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Shape as _, Vec2};
use peniko::Fill;

use crate::arrowhead::{ArrowHead, ArrowHeadSize, Head};
use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::LineStyle;

/// Circular arc from `start` to `end` angle (radians, y-down, so positive
/// sweeps run clockwise on screen), with an optional head at the end.
#[derive(Clone, Debug, Default)]
pub struct Arc {
    /// Center of the supporting circle.
    pub center: Point,
    /// Radius of the supporting circle.
    pub radius: f64,
    /// Start angle.
    pub start: f64,
    /// End angle; the sweep is `end - start` and may be negative.
    pub end: f64,
    /// Decoration at the end point.
    pub head: ArrowHead,
    /// Head proportions.
    pub head_size: ArrowHeadSize,
    /// Stroke; the head is filled with the same color.
    pub line: LineStyle,
}

impl Arc {
    /// Arc without decoration.
    pub fn new(center: impl Into<Point>, radius: f64, start: f64, end: f64) -> Self {
        Self {
            center: center.into(),
            radius,
            start,
            end,
            ..Default::default()
        }
    }

    fn sweep(&self) -> f64 {
        self.end - self.start
    }

    fn point_at(&self, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * self.radius.abs()
    }

    fn end_head(&self) -> Option<Head> {
        let sweep = self.sweep();
        if sweep == 0.0 || self.radius == 0.0 {
            return None;
        }
        let tangent = Vec2::from_angle(self.end + FRAC_PI_2) * sweep.signum();
        Head::at(self.point_at(self.end), tangent, self.head, self.head_size)
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        let sweep = self.sweep();
        let mut bounds = Rect::from_points(self.point_at(self.start), self.point_at(self.end));
        for k in 0..4_u8 {
            let angle = f64::from(k) * FRAC_PI_2;
            if geom::angle_in_sweep(angle, self.start, sweep) {
                bounds = bounds.union_pt(self.point_at(angle));
            }
        }
        let mut bounds = bounds.inflate(hw, hw);
        if let Some(head) = self.end_head() {
            bounds = bounds.union(head.bounds());
        }
        bounds
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        let r = self.radius.abs();
        let d = pt.distance(self.center);
        let raw = if r == 0.0 {
            d
        } else if d > 0.0
            && geom::angle_in_sweep((pt - self.center).atan2(), self.start, self.sweep())
        {
            (d - r).abs()
        } else {
            pt.distance(self.point_at(self.start))
                .min(pt.distance(self.point_at(self.end)))
        };
        let mut best = geom::minus_half_width(raw, self.line.half_width());
        if let Some(head) = self.end_head() {
            best = best.min(head.distance(pt));
        }
        best
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let Some(color) = self.line.resolve(env) else {
            return;
        };
        let arc = kurbo::Arc::new(
            self.center,
            Vec2::new(self.radius.abs(), self.radius.abs()),
            self.start,
            self.sweep(),
            0.0,
        );
        ctx.stroke(
            &arc.to_path(geom::FLATTEN_TOLERANCE),
            &self.line.to_stroke(),
            color,
        );
        if let Some(head) = self.end_head() {
            ctx.fill(&head.path(), color, Fill::NonZero);
        }
    }
}
