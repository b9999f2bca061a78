// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text runs as canvas items.
//!
//! A [`Text`] is a rectangle whose size comes from the canvas's
//! [`TextLayout`]: the canvas measures the run whenever the item is inserted or
//! edited, and the item places the measured box relative to its anchor point.

use alloc::string::String;
use core::ops::Range;

use kurbo::{Point, Rect, Shape as _, Vec2};
use peniko::{Color, Fill};

use crate::geom;
use crate::layout::{FontDesc, TextLayout, TextMetrics};
use crate::render::{DrawEnv, RenderContext};
use crate::shapes::line::segment_path;
use crate::style::{FillStyle, LineStyle};

/// Which point of the text box sits on [`Text::position`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Anchor {
    /// Top-left corner.
    NorthWest,
    /// Middle of the top edge.
    North,
    /// Top-right corner.
    NorthEast,
    /// Middle of the left edge.
    West,
    /// Center of the box.
    Center,
    /// Middle of the right edge.
    East,
    /// Bottom-left corner.
    SouthWest,
    /// Middle of the bottom edge.
    South,
    /// Bottom-right corner.
    SouthEast,
    /// Start of the first baseline.
    #[default]
    LineWest,
    /// Middle of the first baseline.
    Line,
    /// End of the first baseline.
    LineEast,
}

impl Anchor {
    /// Horizontal placement as a fraction of the width: 0, 1/2 or 1.
    fn x_fraction(self) -> f64 {
        match self {
            Self::NorthWest | Self::West | Self::SouthWest | Self::LineWest => 0.0,
            Self::North | Self::Center | Self::South | Self::Line => 0.5,
            Self::NorthEast | Self::East | Self::SouthEast | Self::LineEast => 1.0,
        }
    }

    fn y_offset(self, metrics: &TextMetrics) -> f64 {
        match self {
            Self::NorthWest | Self::North | Self::NorthEast => 0.0,
            Self::West | Self::Center | Self::East => metrics.height / 2.0,
            Self::SouthWest | Self::South | Self::SouthEast => metrics.height,
            Self::LineWest | Self::Line | Self::LineEast => metrics.baseline,
        }
    }
}

/// An editable run of text.
#[derive(Clone, Debug)]
pub struct Text {
    /// Anchor point.
    pub position: Point,
    /// Which point of the box sits on `position`.
    pub anchor: Anchor,
    /// Space between the text and the border.
    pub padding: f64,
    /// Content.
    pub text: String,
    /// Font passed to the layout engine.
    pub font: FontDesc,
    /// Glyph color.
    pub color: Color,
    /// Border; zero width by default.
    pub line: LineStyle,
    /// Background.
    pub fill: FillStyle,
    /// Show the cursor.
    pub editing: bool,
    cursor: usize,
    selection_anchor: Option<usize>,
    metrics: TextMetrics,
    caret: Option<(Vec2, f64)>,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            anchor: Anchor::default(),
            padding: 0.0,
            text: String::new(),
            font: FontDesc::default(),
            color: Color::BLACK,
            line: LineStyle {
                width: 0.0,
                ..Default::default()
            },
            fill: FillStyle::default(),
            editing: false,
            cursor: 0,
            selection_anchor: None,
            metrics: TextMetrics::default(),
            caret: None,
        }
    }
}

impl Text {
    /// Run of `text` anchored at `position` in the default font.
    pub fn new(position: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Extents from the last layout pass.
    pub fn metrics(&self) -> TextMetrics {
        self.metrics
    }

    /// Top-left corner of the glyph box.
    pub fn text_origin(&self) -> Point {
        Point::new(
            self.position.x - self.anchor.x_fraction() * self.metrics.width,
            self.position.y - self.anchor.y_offset(&self.metrics),
        )
    }

    /// Glyph box grown by the padding.
    pub fn rect(&self) -> Rect {
        let origin = self.text_origin();
        Rect::from_origin_size(origin, (self.metrics.width, self.metrics.height))
            .inflate(self.padding, self.padding)
    }

    /// Cursor position as a byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, dropping any selection. Offsets inside a character
    /// snap back to its start.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = self.snap(offset);
        self.selection_anchor = None;
    }

    /// Select from `anchor` to `cursor` (either order).
    pub fn select(&mut self, anchor: usize, cursor: usize) {
        self.selection_anchor = Some(self.snap(anchor));
        self.cursor = self.snap(cursor);
    }

    /// Selected byte range, if any and non-empty.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.selection_anchor?;
        let (start, end) = if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        };
        (start < end).then_some(start..end)
    }

    /// Replace the selection (or insert at the cursor) with `s`, leaving the
    /// cursor after it. Offsets left behind by a direct change to
    /// [`text`](Self::text) are snapped into the current string first.
    pub fn replace_selection(&mut self, s: &str) {
        let range = self.selection().unwrap_or(self.cursor..self.cursor);
        let (start, end) = (self.snap(range.start), self.snap(range.end));
        self.text.replace_range(start..end, s);
        self.cursor = start + s.len();
        self.selection_anchor = None;
    }

    fn snap(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Re-measure the run and the caret. Called by the canvas after every
    /// insert or edit.
    pub(crate) fn relayout(&mut self, layout: &dyn TextLayout) {
        self.cursor = self.snap(self.cursor);
        self.selection_anchor = self.selection_anchor.map(|a| self.snap(a));
        self.metrics = layout.measure(&self.text, &self.font);
        let before = &self.text[..self.cursor];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line_index = before[..line_start].matches('\n').count();
        let line_height = layout.measure("", &self.font).height;
        let prefix = layout.measure(&before[line_start..], &self.font);
        #[allow(
            clippy::cast_precision_loss,
            reason = "Line counts are far below f64 precision limits."
        )]
        let top = line_index as f64 * line_height;
        self.caret = Some((Vec2::new(prefix.width, top), line_height));
    }

    pub(crate) fn bounds(&self) -> Rect {
        let hw = self.line.half_width();
        self.rect().inflate(hw, hw)
    }

    pub(crate) fn distance(&self, pt: Point) -> f64 {
        geom::minus_half_width(
            geom::rect_outside_distance(self.rect(), pt),
            self.line.half_width(),
        )
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub(crate) fn draw(&self, ctx: &mut dyn RenderContext, env: &DrawEnv) {
        let rect = self.rect();
        if let Some(color) = self.fill.resolve(env) {
            ctx.fill(&rect.to_path(geom::FLATTEN_TOLERANCE), color, Fill::NonZero);
        }
        if let Some(color) = self.line.resolve(env) {
            ctx.stroke(
                &rect.to_path(geom::FLATTEN_TOLERANCE),
                &self.line.to_stroke(),
                color,
            );
        }
        let origin = self.text_origin();
        if !self.text.is_empty() {
            ctx.draw_text(origin, &self.text, &self.font, self.color);
        }
        let caret = self.caret.filter(|_| self.editing && !env.is_vector);
        if let Some((offset, height)) = caret {
            let top = origin + offset;
            ctx.stroke(
                &segment_path(top, top + Vec2::new(0.0, height)),
                &kurbo::Stroke::new(1.0),
                self.color,
            );
        }
    }
}
