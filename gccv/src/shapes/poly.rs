// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};
use peniko::Fill;

use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::{FillStyle, LineStyle};

/// Open chain of straight segments.
#[derive(Clone, Debug, Default)]
pub struct PolyLine {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Stroke.
    pub line: LineStyle,
}

impl PolyLine {
    /// Chain through `points` with the default stroke.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
            line: LineStyle::default(),
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        geom::points_bbox(&self.points).map_or(Rect::ZERO, |r| r.inflate(hw, hw))
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        geom::minus_half_width(
            geom::polyline_distance(&self.points, false, pt),
            self.line.half_width(),
        )
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        if self.points.len() < 2 {
            return;
        }
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(
                &geom::polyline_path(&self.points),
                &self.line.to_stroke(),
                color,
            );
        }
    }
}

/// Closed polygon.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    /// Vertices; the last one connects back to the first.
    pub points: Vec<Point>,
    /// Outline.
    pub line: LineStyle,
    /// Interior.
    pub fill: FillStyle,
}

impl Polygon {
    /// Polygon through `points` with default styles.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
            ..Default::default()
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        geom::points_bbox(&self.points).map_or(Rect::ZERO, |r| r.inflate(hw, hw))
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        if self.fill.is_filled() && geom::polygon_contains(&self.points, pt) {
            return 0.0;
        }
        geom::minus_half_width(
            geom::polyline_distance(&self.points, true, pt),
            self.line.half_width(),
        )
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        if self.points.len() < 2 {
            return;
        }
        let path = geom::polygon_path(&self.points);
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

    fn square() -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn empty_polyline_is_unselectable() {
        let p = PolyLine::default();
        assert!(p.distance(Point::ZERO).is_infinite());
        assert_eq!(p.bounds(), Rect::ZERO);
    }

    #[test]
    fn polyline_is_open() {
        let mut p = PolyLine::new(square());
        p.line.width = 0.0;
        // The closing edge x = 0 only exists for the polygon.
        assert_eq!(p.distance(Point::new(1.0, 5.0)), 5.0);
        let mut closed = Polygon::new(square());
        closed.line.width = 0.0;
        assert_eq!(closed.distance(Point::new(1.0, 5.0)), 1.0);
    }

    #[test]
    fn polygon_fill_controls_interior_hits() {
        let mut p = Polygon::new(square());
        p.line.width = 2.0;
        assert_eq!(p.distance(Point::new(3.0, 5.0)), 2.0);
        p.fill = FillStyle::solid(Color::BLACK);
        assert_eq!(p.distance(Point::new(3.0, 5.0)), 0.0);
        assert_eq!(p.bounds(), Rect::new(-1.0, -1.0, 11.0, 11.0));
    }
}
