// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke and fill parameters shared by the shapes.

use alloc::vec::Vec;
use kurbo::{Cap, Join, Stroke};
use peniko::Color;

use crate::render::{DrawEnv, is_transparent};

/// Stroke parameters for outlined shapes.
#[derive(Clone, Debug)]
pub struct LineStyle {
    /// Stroke color. Transparent disables the stroke pass.
    pub color: Color,
    /// Stroke width in logical units.
    pub width: f64,
    /// Alternating on/off dash lengths; empty for a solid line.
    pub dashes: Vec<f64>,
    /// Offset into the dash pattern.
    pub dash_offset: f64,
    /// Use the canvas foreground color instead of [`LineStyle::color`].
    pub auto_color: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            dashes: Vec::new(),
            dash_offset: 0.0,
            auto_color: false,
        }
    }
}

impl LineStyle {
    /// A solid stroke of the given width and color.
    pub fn new(width: f64, color: Color) -> Self {
        Self {
            color,
            width,
            ..Default::default()
        }
    }

    /// Half the stroke width, the amount geometry grows by when stroked.
    pub fn half_width(&self) -> f64 {
        self.width.max(0.0) / 2.0
    }

    /// Effective color for drawing; `None` when the stroke would be invisible.
    pub fn resolve(&self, env: &DrawEnv) -> Option<Color> {
        let color = if self.auto_color {
            env.foreground
        } else {
            self.color
        };
        (self.width > 0.0 && !is_transparent(color)).then_some(color)
    }

    /// Kurbo stroke description for this style.
    pub fn to_stroke(&self) -> Stroke {
        let stroke = Stroke::new(self.width.max(0.0))
            .with_caps(Cap::Butt)
            .with_join(Join::Round);
        if self.dashes.is_empty() {
            stroke
        } else {
            stroke.with_dashes(self.dash_offset, self.dashes.iter().copied())
        }
    }
}

/// Fill parameters for closed shapes.
#[derive(Clone, Copy, Debug)]
pub struct FillStyle {
    /// Fill color. Transparent disables the fill pass and makes the interior
    /// transparent to hit testing.
    pub color: Color,
    /// Use the canvas background color instead of [`FillStyle::color`].
    pub auto_color: bool,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            color: Color::TRANSPARENT,
            auto_color: false,
        }
    }
}

impl FillStyle {
    /// An opaque or translucent fill.
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            auto_color: false,
        }
    }

    /// True if the interior is painted, and therefore picks at distance zero.
    pub fn is_filled(&self) -> bool {
        self.auto_color || !is_transparent(self.color)
    }

    /// Effective color for drawing; `None` when the fill would be invisible.
    pub fn resolve(&self, env: &DrawEnv) -> Option<Color> {
        let color = if self.auto_color {
            env.background
        } else {
            self.color
        };
        (!is_transparent(color)).then_some(color)
    }
}
