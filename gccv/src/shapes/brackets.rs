// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Point, Rect, Shape as _, Vec2};

use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::LineStyle;

/// Bracket glyph family.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BracketsKind {
    /// `[ ]`
    #[default]
    Square,
    /// `( )`
    Round,
    /// `{ }`
    Curly,
}

bitflags::bitflags! {
    /// Which sides of the enclosed rectangle carry a bracket.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BracketsUsed: u8 {
        /// Bracket on the left edge.
        const OPENING = 1 << 0;
        /// Bracket on the right edge.
        const CLOSING = 1 << 1;
    }
}

impl Default for BracketsUsed {
    fn default() -> Self {
        Self::all()
    }
}

/// Pair of brackets enclosing a rectangle.
#[derive(Clone, Debug)]
pub struct Brackets {
    /// Enclosed region; the brackets sit on its left and right edges.
    pub rect: Rect,
    /// Glyph family.
    pub kind: BracketsKind,
    /// Sides drawn.
    pub used: BracketsUsed,
    /// How far the bracket reaches inwards from the edge.
    pub depth: f64,
    /// Stroke.
    pub line: LineStyle,
}

impl Default for Brackets {
    fn default() -> Self {
        Self {
            rect: Rect::ZERO,
            kind: BracketsKind::default(),
            used: BracketsUsed::default(),
            depth: 4.0,
            line: LineStyle::default(),
        }
    }
}

impl Brackets {
    /// Both brackets of `kind` around `rect`.
    pub fn new(rect: Rect, kind: BracketsKind) -> Self {
        Self {
            rect,
            kind,
            ..Default::default()
        }
    }

    /// Outline of every used bracket, one subpath each.
    pub fn path(&self) -> BezPath {
        let r = self.rect.abs();
        let mut path = BezPath::new();
        if self.used.contains(BracketsUsed::OPENING) {
            push_bracket(&mut path, self.kind, r.x0, self.depth, r.y0, r.y1);
        }
        if self.used.contains(BracketsUsed::CLOSING) {
            push_bracket(&mut path, self.kind, r.x1, -self.depth, r.y0, r.y1);
        }
        path
    }

    pub(crate) fn bounds(&self) -> Rect {
        let path = self.path();
        if path.elements().is_empty() {
            return Rect::ZERO;
        }
        let hw = self.line.half_width();
        path.bounding_box().inflate(hw, hw)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        geom::minus_half_width(
            geom::path_outline_distance(&self.path(), pt),
            self.line.half_width(),
        )
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.rect = self.rect + delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(&self.path(), &self.line.to_stroke(), color);
        }
    }
}

/// Append one bracket whose spine lies on `x`, reaching `depth` inwards
/// (negative for a closing bracket).
fn push_bracket(path: &mut BezPath, kind: BracketsKind, x: f64, depth: f64, y0: f64, y1: f64) {
    let inner = x + depth;
    match kind {
        BracketsKind::Square => {
            path.move_to((inner, y0));
            path.line_to((x, y0));
            path.line_to((x, y1));
            path.line_to((inner, y1));
        }
        BracketsKind::Round => {
            // A quadratic peaks halfway to its control point.
            path.move_to((inner, y0));
            path.quad_to((x - depth, (y0 + y1) / 2.0), (inner, y1));
        }
        BracketsKind::Curly => {
            let mid = (y0 + y1) / 2.0;
            let spine = x + depth / 2.0;
            let d = depth.abs() / 2.0;
            path.move_to((inner, y0));
            path.quad_to((spine, y0), (spine, y0 + d));
            path.line_to((spine, mid - d));
            path.quad_to((spine, mid), (x, mid));
            path.quad_to((spine, mid), (spine, mid + d));
            path.line_to((spine, y1 - d));
            path.quad_to((spine, y1), (inner, y1));
        }
    }
}
