// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Shape as _, Vec2};
use peniko::Fill;

use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::{FillStyle, LineStyle};

/// Circle given by its center and radius.
#[derive(Clone, Debug, Default)]
pub struct Circle {
    /// Center.
    pub center: Point,
    /// Radius; negative values are treated as their magnitude.
    pub radius: f64,
    /// Outline.
    pub line: LineStyle,
    /// Interior.
    pub fill: FillStyle,
}

impl Circle {
    /// Circle with default styles.
    pub fn new(center: impl Into<Point>, radius: f64) -> Self {
        Self {
            center: center.into(),
            radius,
            ..Default::default()
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        let r = self.radius.abs() + self.line.half_width();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        let r = self.radius.abs();
        let d = pt.distance(self.center);
        if d <= r && self.fill.is_filled() {
            return 0.0;
        }
        geom::minus_half_width((d - r).abs(), self.line.half_width())
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let path =
            kurbo::Circle::new(self.center, self.radius.abs()).to_path(geom::FLATTEN_TOLERANCE);
        if let Some(color) = self.fill.resolve(env) {
            ctx.fill(&path, color, Fill::NonZero);
        }
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(&path, &self.line.to_stroke(), color);
        }
    }
}
