// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{BezPath, CubicBez, ParamCurveExtrema, ParamCurveNearest, Point, Rect, Vec2};
use peniko::{Color, Fill};

use crate::arrowhead::{ArrowHead, ArrowHeadSize, Head};
use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::shapes::line::segment_path;
use crate::style::LineStyle;

const NEAREST_ACCURACY: f64 = 1e-6;

/// Cubic Bézier curve with an optional head at its end.
///
/// The curve has no geometry until its control points are set; until then it
/// is unselectable and has empty bounds.
#[derive(Clone, Debug)]
pub struct BezierArrow {
    /// Start, two control points, end.
    pub points: Option<[Point; 4]>,
    /// Decoration at the end point.
    pub head: ArrowHead,
    /// Head proportions.
    pub head_size: ArrowHeadSize,
    /// Show the control polygon (interactive editing only).
    pub show_controls: bool,
    /// Stroke; the head is filled with the same color.
    pub line: LineStyle,
}

impl Default for BezierArrow {
    fn default() -> Self {
        Self {
            points: None,
            head: ArrowHead::Full,
            head_size: ArrowHeadSize::default(),
            show_controls: false,
            line: LineStyle::default(),
        }
    }
}

impl BezierArrow {
    /// Curve through the given control points, with a full end head.
    pub fn new(points: [Point; 4]) -> Self {
        Self {
            points: Some(points),
            ..Default::default()
        }
    }

    /// Replace the control points.
    pub fn set_controls(&mut self, points: [Point; 4]) {
        self.points = Some(points);
    }

    fn curve(&self) -> Option<CubicBez> {
        self.points.map(|[p0, p1, p2, p3]| CubicBez::new(p0, p1, p2, p3))
    }

    fn end_head(&self) -> Option<Head> {
        let [p0, p1, p2, p3] = self.points?;
        // The end tangent degenerates when control points coincide with the end.
        let direction = [p3 - p2, p3 - p1, p3 - p0]
            .into_iter()
            .find(|d| d.hypot2() > 0.0)
            .unwrap_or(Vec2::ZERO);
        Head::at(p3, direction, self.head, self.head_size)
    }

    pub(crate) fn bounds(&self) -> Rect {
        let Some(curve) = self.curve() else {
            return Rect::ZERO;
        };
        let hw = self.line.half_width();
        let mut bounds = ParamCurveExtrema::bounding_box(&curve).inflate(hw, hw);
        if self.show_controls {
            bounds = bounds.union_pt(curve.p1).union_pt(curve.p2);
        }
        if let Some(head) = self.end_head() {
            bounds = bounds.union(head.bounds());
        }
        bounds
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        let Some(curve) = self.curve() else {
            return f64::INFINITY;
        };
        let nearest = curve.nearest(pt, NEAREST_ACCURACY);
        let mut best = geom::minus_half_width(nearest.distance_sq.sqrt(), self.line.half_width());
        if let Some(head) = self.end_head() {
            best = best.min(head.distance(pt));
        }
        best
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        if let Some(points) = &mut self.points {
            for p in points {
                *p += delta;
            }
        }
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let Some(curve) = self.curve() else {
            return;
        };
        let Some(color) = self.line.resolve(env) else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(curve.p0);
        path.curve_to(curve.p1, curve.p2, curve.p3);
        ctx.stroke(&path, &self.line.to_stroke(), color);
        if let Some(head) = self.end_head() {
            ctx.fill(&head.path(), color, Fill::NonZero);
        }
        if self.show_controls && !env.is_vector {
            let guide = kurbo::Stroke::new(1.0);
            let guide_color = Color::from_rgba8(128, 128, 128, 255);
            ctx.stroke(&segment_path(curve.p0, curve.p1), &guide, guide_color);
            ctx.stroke(&segment_path(curve.p2, curve.p3), &guide, guide_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Recorder;

    fn straight() -> BezierArrow {
        let mut b = BezierArrow::new([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
        ]);
        b.head = ArrowHead::None;
        b.line.width = 2.0;
        b
    }

    #[test]
    fn unset_controls_are_unselectable() {
        let b = BezierArrow::default();
        assert!(b.distance(Point::ZERO).is_infinite());
        assert_eq!(b.bounds(), Rect::ZERO);
    }

    #[test]
    fn straight_curve_behaves_like_a_line() {
        let b = straight();
        assert!(b.distance(Point::new(15.0, 0.5)) < 1e-6);
        assert!((b.distance(Point::new(15.0, 4.0)) - 3.0).abs() < 1e-6);
        let bounds = b.bounds();
        assert!((bounds.x1 - 30.0).abs() < 1e-9 && (bounds.y0 - -1.0).abs() < 1e-9);
    }

    #[test]
    fn control_points_widen_bounds_only_when_shown() {
        let mut b = BezierArrow::new([
            Point::new(0.0, 0.0),
            Point::new(0.0, 40.0),
            Point::new(30.0, 40.0),
            Point::new(30.0, 0.0),
        ]);
        b.head = ArrowHead::None;
        b.line.width = 0.0;
        // The curve peaks at three quarters of the control height.
        assert!((b.bounds().y1 - 30.0).abs() < 1e-9);
        b.show_controls = true;
        assert!((b.bounds().y1 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn head_uses_fallback_tangent() {
        let mut b = straight();
        b.head = ArrowHead::Full;
        b.points = Some([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 0.0),
        ]);
        let head = b.end_head().expect("head from p3 - p1");
        assert_eq!(head.neck, Point::new(24.0, 0.0));
    }

    #[test]
    fn guides_are_skipped_for_vector_output() {
        let mut b = straight();
        b.show_controls = true;
        let mut env = DrawEnv {
            foreground: Color::BLACK,
            background: Color::WHITE,
            is_vector: true,
        };
        let mut rec = Recorder::new();
        b.draw(&mut rec, &env);
        assert_eq!(rec.stroke_count(), 1);
        env.is_vector = false;
        let mut rec = Recorder::new();
        b.draw(&mut rec, &env);
        assert_eq!(rec.stroke_count(), 3);
    }
}
