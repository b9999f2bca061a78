// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, BezPath, Point, Rect, Shape as _, Vec2};
use peniko::Fill;

use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::{FillStyle, LineStyle};

/// Arbitrary Bézier path.
#[derive(Clone, Debug, Default)]
pub struct Path {
    /// Geometry; may contain several subpaths.
    pub path: BezPath,
    /// Outline.
    pub line: LineStyle,
    /// Interior, under the non-zero rule.
    pub fill: FillStyle,
}

impl Path {
    /// Item for `path` with default styles.
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        if self.path.elements().is_empty() {
            return Rect::ZERO;
        }
        let hw = self.line.half_width();
        self.path.bounding_box().inflate(hw, hw)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        if self.fill.is_filled() && self.path.contains(pt) {
            return 0.0;
        }
        geom::minus_half_width(
            geom::path_outline_distance(&self.path, pt),
            self.line.half_width(),
        )
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.path.apply_affine(Affine::translate(delta));
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        if let Some(color) = self.fill.resolve(env) {
            ctx.fill(&self.path, color, Fill::NonZero);
        }
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(&self.path, &self.line.to_stroke(), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::Color;

    fn triangle() -> Path {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((0.0, 10.0));
        path.close_path();
        let mut p = Path::new(path);
        p.line.width = 2.0;
        p
    }

    #[test]
    fn empty_path_has_no_extent() {
        let p = Path::default();
        assert_eq!(p.bounds(), Rect::ZERO);
        assert!(p.distance(Point::ZERO).is_infinite());
    }

    #[test]
    fn fill_decides_interior_hits() {
        let mut p = triangle();
        assert_eq!(p.distance(Point::new(2.0, 3.0)), 1.0);
        p.fill = FillStyle::solid(Color::BLACK);
        assert_eq!(p.distance(Point::new(2.0, 3.0)), 0.0);
    }

    #[test]
    fn translate_moves_every_point() {
        let mut p = triangle();
        p.translate(Vec2::new(5.0, -5.0));
        assert_eq!(p.bounds(), Rect::new(4.0, -6.0, 16.0, 6.0));
    }
}
