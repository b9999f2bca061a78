// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Shape as _, Vec2};
use peniko::Fill;

use crate::geom;
use crate::render::{DrawEnv, RenderContext};
use crate::style::{FillStyle, LineStyle};

/// Axis-aligned rectangle given by an origin and a (possibly negative) size.
#[derive(Clone, Debug, Default)]
pub struct Rectangle {
    /// Origin x.
    pub x: f64,
    /// Origin y.
    pub y: f64,
    /// Extent along x; may be negative.
    pub width: f64,
    /// Extent along y; may be negative.
    pub height: f64,
    /// Outline.
    pub line: LineStyle,
    /// Interior.
    pub fill: FillStyle,
}

impl Rectangle {
    /// Rectangle with default styles.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    /// Replace the geometry.
    pub fn set_position(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    /// Normalized geometric rectangle, without stroke.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height).abs()
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        self.rect().inflate(hw, hw)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        let rect = self.rect();
        let hw = self.line.half_width();
        if rect.contains(pt) {
            if self.fill.is_filled() {
                return 0.0;
            }
            let d = geom::rect_edge_distance(rect, pt);
            if d <= hw { 0.0 } else { d }
        } else {
            geom::minus_half_width(geom::rect_outside_distance(rect, pt), hw)
        }
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let path = self.rect().to_path(geom::FLATTEN_TOLERANCE);
        if let Some(color) = self.fill.resolve(env) {
            ctx.fill(&path, color, Fill::NonZero);
        }
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(&path, &self.line.to_stroke(), color);
        }
    }
}
