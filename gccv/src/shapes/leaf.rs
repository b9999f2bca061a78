// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Point, Rect, Shape as _, Vec2};
use peniko::Fill;

use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::{FillStyle, LineStyle};

/// Lens-shaped lobe rooted at `center` and pointing along `rotation`.
#[derive(Clone, Debug)]
pub struct Leaf {
    /// Base of the lobe.
    pub center: Point,
    /// Length from the base to the tip.
    pub radius: f64,
    /// Direction of the tip, in radians.
    pub rotation: f64,
    /// Widest extent as a fraction of the length.
    pub width_factor: f64,
    /// Outline.
    pub line: LineStyle,
    /// Interior.
    pub fill: FillStyle,
}

impl Default for Leaf {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            radius: 0.0,
            rotation: 0.0,
            width_factor: 0.5,
            line: LineStyle::default(),
            fill: FillStyle::default(),
        }
    }
}

impl Leaf {
    /// Lobe of length `radius` pointing along `rotation`.
    pub fn new(center: impl Into<Point>, radius: f64, rotation: f64) -> Self {
        Self {
            center: center.into(),
            radius,
            rotation,
            ..Default::default()
        }
    }

    /// Closed outline: two cubics meeting at the base and the tip.
    pub fn path(&self) -> BezPath {
        let d = Vec2::from_angle(self.rotation) * self.radius.abs();
        let n = Vec2::new(-d.y, d.x) * (self.width_factor.abs() * 2.0 / 3.0);
        let base = self.center;
        let tip = base + d;
        let mut path = BezPath::new();
        path.move_to(base);
        path.curve_to(base + d * 0.25 + n, base + d * 0.75 + n, tip);
        path.curve_to(base + d * 0.75 - n, base + d * 0.25 - n, base);
        path.close_path();
        path
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        self.path().bounding_box().inflate(hw, hw)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        let path = self.path();
        if self.fill.is_filled() && path.contains(pt) {
            return 0.0;
        }
        geom::minus_half_width(geom::path_outline_distance(&path, pt), self.line.half_width())
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let path = self.path();
        if let Some(color) = self.fill.resolve(env) {
            ctx.fill(&path, color, Fill::NonZero);
        }
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(&path, &self.line.to_stroke(), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::Color;

    fn lobe() -> Leaf {
        let mut l = Leaf::new((0.0, 0.0), 20.0, 0.0);
        l.line.width = 0.0;
        l
    }

    #[test]
    fn lobe_spans_its_length_and_width() {
        let b = lobe().bounds();
        assert!(b.x0.abs() < 1e-9 && (b.x1 - 20.0).abs() < 1e-9);
        // Half of width_factor * radius on each side.
        assert!((b.y1 - 5.0).abs() < 1e-9 && (b.y0 + 5.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_turns_the_tip() {
        let mut l = lobe();
        l.rotation = core::f64::consts::FRAC_PI_2;
        let b = l.bounds();
        assert!((b.y1 - 20.0).abs() < 1e-9);
        assert!(b.y0.abs() < 1e-9);
    }

    #[test]
    fn filled_lobe_picks_inside() {
        let mut l = lobe();
        assert!(l.distance(Point::new(10.0, 0.0)) > 4.0);
        l.fill = FillStyle::solid(Color::BLACK);
        assert_eq!(l.distance(Point::new(10.0, 0.0)), 0.0);
        assert!((l.distance(Point::new(25.0, 0.0)) - 5.0).abs() < 1e-6);
    }
}
