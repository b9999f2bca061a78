// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Fill;

use crate::arrowhead::{ArrowHead, ArrowHeadSize, Head};
use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::LineStyle;

/// Straight segment.
#[derive(Clone, Debug, Default)]
pub struct Line {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
    /// Stroke.
    pub line: LineStyle,
}

impl Line {
    /// Segment with the default stroke.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            line: LineStyle::default(),
        }
    }

    /// Replace both endpoints.
    pub fn set_position(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        Rect::from_points(self.start, self.end).inflate(hw, hw)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        geom::minus_half_width(
            geom::segment_distance(self.start, self.end, pt),
            self.line.half_width(),
        )
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(&segment_path(self.start, self.end), &self.line.to_stroke(), color);
        }
    }
}

/// Straight segment with optional heads at either end.
#[derive(Clone, Debug, Default)]
pub struct Arrow {
    /// Tail point.
    pub start: Point,
    /// Head point.
    pub end: Point,
    /// Decoration at `start`, pointing away from `end`.
    pub start_head: ArrowHead,
    /// Decoration at `end`, pointing away from `start`.
    pub end_head: ArrowHead,
    /// Proportions shared by both heads.
    pub head_size: ArrowHeadSize,
    /// Shaft stroke; heads are filled with the same color.
    pub line: LineStyle,
}

impl Arrow {
    /// Arrow with a full head at `end`.
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            end_head: ArrowHead::Full,
            ..Default::default()
        }
    }

    /// Replace both endpoints.
    pub fn set_position(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
    }

    fn heads(&self) -> (Option<Head>, Option<Head>) {
        let dir = self.end - self.start;
        (
            Head::at(self.start, -dir, self.start_head, self.head_size),
            Head::at(self.end, dir, self.end_head, self.head_size),
        )
    }

    /// Shaft endpoints, shortened to the necks of the heads.
    fn shaft(&self, heads: &(Option<Head>, Option<Head>)) -> (Point, Point) {
        let start = heads.0.as_ref().map_or(self.start, |h| h.neck);
        let end = heads.1.as_ref().map_or(self.end, |h| h.neck);
        (start, end)
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        let mut bounds = Rect::from_points(self.start, self.end).inflate(hw, hw);
        let heads = self.heads();
        for head in [&heads.0, &heads.1].into_iter().flatten() {
            bounds = bounds.union(head.bounds());
        }
        bounds
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        let heads = self.heads();
        let (a, b) = self.shaft(&heads);
        let mut best =
            geom::minus_half_width(geom::segment_distance(a, b, pt), self.line.half_width());
        for head in [&heads.0, &heads.1].into_iter().flatten() {
            best = best.min(head.distance(pt));
        }
        best
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let Some(color) = self.line.resolve(env) else {
            return;
        };
        let heads = self.heads();
        let (a, b) = self.shaft(&heads);
        ctx.stroke(&segment_path(a, b), &self.line.to_stroke(), color);
        for head in [&heads.0, &heads.1].into_iter().flatten() {
            ctx.fill(&head.path(), color, Fill::NonZero);
        }
    }
}

pub(crate) fn segment_path(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path
}
