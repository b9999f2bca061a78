// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shape catalog.
//!
//! Every item on a canvas carries one [`Shape`]. Leaf shapes know their own
//! bounds, hit distance and drawing; [`Group`] only holds children, and the
//! canvas walks those itself.
//!
//! Shape geometry is in the coordinates of the parent group. Bounds include
//! half the stroke width and any decorations.

mod arc;
mod bezier_arrow;
mod brackets;
mod circle;
mod group;
mod leaf;
pub(crate) mod line;
mod path;
mod poly;
mod rectangle;
mod squiggle;
mod text;
mod wedge;

pub use arc::Arc;
pub use bezier_arrow::BezierArrow;
pub use brackets::{Brackets, BracketsKind, BracketsUsed};
pub use circle::Circle;
pub use group::Group;
pub use leaf::Leaf;
pub use line::{Arrow, Line};
pub use path::Path;
pub use poly::{PolyLine, Polygon};
pub use rectangle::Rectangle;
pub use squiggle::Squiggle;
pub use text::{Anchor, Text};
pub use wedge::{Hash, Wedge};

use kurbo::{Point, Rect, Vec2};

use crate::render::{DrawEnv, RenderContext};
use crate::style::{FillStyle, LineStyle};

/// Geometry and style of one item.
#[derive(Clone, Debug)]
pub enum Shape {
    /// See [`Rectangle`].
    Rectangle(Rectangle),
    /// See [`Circle`].
    Circle(Circle),
    /// See [`Line`].
    Line(Line),
    /// See [`PolyLine`].
    PolyLine(PolyLine),
    /// See [`Polygon`].
    Polygon(Polygon),
    /// See [`Arc`].
    Arc(Arc),
    /// See [`Arrow`].
    Arrow(Arrow),
    /// See [`BezierArrow`].
    BezierArrow(BezierArrow),
    /// See [`Wedge`].
    Wedge(Wedge),
    /// See [`Hash`].
    Hash(Hash),
    /// See [`Squiggle`].
    Squiggle(Squiggle),
    /// See [`Leaf`].
    Leaf(Leaf),
    /// See [`Brackets`].
    Brackets(Brackets),
    /// See [`Path`].
    Path(Path),
    /// See [`Text`].
    Text(Text),
    /// See [`Group`].
    Group(Group),
}

macro_rules! shape_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Shape {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

shape_from!(
    Rectangle,
    Circle,
    Line,
    PolyLine,
    Polygon,
    Arc,
    Arrow,
    BezierArrow,
    Wedge,
    Hash,
    Squiggle,
    Leaf,
    Brackets,
    Path,
    Text,
    Group,
);

/// Expand `$body` once per leaf variant with `$s` bound to the payload;
/// `$group` handles the container.
macro_rules! dispatch {
    ($shape:expr, $s:ident => $body:expr, Group($g:pat) => $group:expr) => {
        match $shape {
            Shape::Rectangle($s) => $body,
            Shape::Circle($s) => $body,
            Shape::Line($s) => $body,
            Shape::PolyLine($s) => $body,
            Shape::Polygon($s) => $body,
            Shape::Arc($s) => $body,
            Shape::Arrow($s) => $body,
            Shape::BezierArrow($s) => $body,
            Shape::Wedge($s) => $body,
            Shape::Hash($s) => $body,
            Shape::Squiggle($s) => $body,
            Shape::Leaf($s) => $body,
            Shape::Brackets($s) => $body,
            Shape::Path($s) => $body,
            Shape::Text($s) => $body,
            Shape::Group($g) => $group,
        }
    };
}

impl Shape {
    /// Short lowercase name of the variant, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Rectangle(_) => "rectangle",
            Self::Circle(_) => "circle",
            Self::Line(_) => "line",
            Self::PolyLine(_) => "polyline",
            Self::Polygon(_) => "polygon",
            Self::Arc(_) => "arc",
            Self::Arrow(_) => "arrow",
            Self::BezierArrow(_) => "bezier-arrow",
            Self::Wedge(_) => "wedge",
            Self::Hash(_) => "hash",
            Self::Squiggle(_) => "squiggle",
            Self::Leaf(_) => "leaf",
            Self::Brackets(_) => "brackets",
            Self::Path(_) => "path",
            Self::Text(_) => "text",
            Self::Group(_) => "group",
        }
    }

    /// True for [`Shape::Group`].
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// The group payload, if this is a group.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            _ => None,
        }
    }

    pub(crate) fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Self::Group(g) => Some(g),
            _ => None,
        }
    }

    /// The text payload, if this is a text run.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Stroke style, for shapes that have one.
    pub fn line_style(&self) -> Option<&LineStyle> {
        dispatch!(self, s => Some(&s.line), Group(_) => None)
    }

    /// Mutable stroke style, for shapes that have one.
    pub fn line_style_mut(&mut self) -> Option<&mut LineStyle> {
        dispatch!(self, s => Some(&mut s.line), Group(_) => None)
    }

    /// Fill style, for closed shapes.
    pub fn fill_style(&self) -> Option<&FillStyle> {
        match self {
            Self::Rectangle(s) => Some(&s.fill),
            Self::Circle(s) => Some(&s.fill),
            Self::Polygon(s) => Some(&s.fill),
            Self::Wedge(s) => Some(&s.fill),
            Self::Leaf(s) => Some(&s.fill),
            Self::Path(s) => Some(&s.fill),
            Self::Text(s) => Some(&s.fill),
            _ => None,
        }
    }

    /// Mutable fill style, for closed shapes.
    pub fn fill_style_mut(&mut self) -> Option<&mut FillStyle> {
        match self {
            Self::Rectangle(s) => Some(&mut s.fill),
            Self::Circle(s) => Some(&mut s.fill),
            Self::Polygon(s) => Some(&mut s.fill),
            Self::Wedge(s) => Some(&mut s.fill),
            Self::Leaf(s) => Some(&mut s.fill),
            Self::Path(s) => Some(&mut s.fill),
            Self::Text(s) => Some(&mut s.fill),
            _ => None,
        }
    }

    /// Bounds from the shape's own parameters; `None` for groups, whose
    /// bounds depend on their children.
    pub(crate) fn leaf_bounds(&self) -> Option<Rect> {
        dispatch!(self, s => Some(s.bounds()), Group(_) => None)
    }

    /// Hit distance for leaves; groups report infinity here and are walked by
    /// the canvas.
    pub(crate) fn leaf_distance(&self, pt: Point) -> f64 {
        dispatch!(self, s => s.distance(pt), Group(_) => f64::INFINITY)
    }

    /// Translate leaf geometry. Groups carry no geometry of their own.
    pub(crate) fn translate(&mut self, delta: Vec2) {
        dispatch!(self, s => s.translate(delta), Group(_) => {});
    }

    pub(crate) fn draw_leaf(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        dispatch!(self, s => s.draw(ctx, env), Group(_) => {});
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_defer_to_the_tree() {
        let g = Shape::from(Group::new());
        assert!(g.is_group());
        assert_eq!(g.leaf_bounds(), None);
        assert!(g.leaf_distance(Point::ZERO).is_infinite());
        assert!(g.line_style().is_none());
    }

    #[test]
    fn leaf_dispatch_reaches_the_payload() {
        let mut r = Shape::from(Rectangle::new(0.0, 0.0, 10.0, 10.0));
        if let Some(line) = r.line_style_mut() {
            line.width = 2.0;
        }
        assert_eq!(r.leaf_bounds(), Some(Rect::new(-1.0, -1.0, 11.0, 11.0)));
        r.translate(Vec2::new(1.0, 1.0));
        assert_eq!(r.leaf_bounds(), Some(Rect::new(0.0, 0.0, 12.0, 12.0)));
        assert_eq!(r.kind_name(), "rectangle");
        assert!(r.fill_style().is_some());
        assert!(Shape::from(Line::default()).fill_style().is_none());
    }
}
