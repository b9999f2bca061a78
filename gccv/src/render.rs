// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering contract between items and the host drawing surface.
//!
//! Items never talk to a concrete renderer. They issue path fills and strokes,
//! text runs, and scoped transform/clip/blend state against a [`RenderContext`].
//! Hosts implement the trait on top of whatever immediate-mode 2D API they have.
//!
//! [`Recorder`] is a [`RenderContext`] that records a flat list of [`DrawOp`]s.
//! It is useful for tests and as a vector export sink.

use alloc::{string::String, vec::Vec};
use kurbo::{Affine, BezPath, Point, Rect, Stroke};
use peniko::{BlendMode, Color, Fill};

use crate::layout::FontDesc;

/// An immediate-mode 2D drawing surface.
///
/// Push/pop calls are always balanced by the canvas.
pub trait RenderContext {
    /// Push a transform, composed with the current one.
    fn push_transform(&mut self, transform: Affine);
    /// Pop the most recent transform.
    fn pop_transform(&mut self);
    /// Intersect the clip region with `rect` (in current coordinates).
    fn push_clip(&mut self, rect: Rect);
    /// Pop the most recent clip.
    fn pop_clip(&mut self);
    /// Composite subsequent drawing with `mode` until the matching pop.
    fn push_blend(&mut self, mode: BlendMode);
    /// Pop the most recent blend layer.
    fn pop_blend(&mut self);
    /// Fill `path` with a solid color.
    fn fill(&mut self, path: &BezPath, color: Color, rule: Fill);
    /// Stroke `path` with a solid color.
    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color);
    /// Draw a run of text with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, font: &FontDesc, color: Color);
}

/// Canvas-wide values items may consult while drawing.
#[derive(Clone, Copy, Debug)]
pub struct DrawEnv {
    /// Color used by items whose line style asks for the automatic color.
    pub foreground: Color,
    /// Color used by items whose fill style asks for the automatic color.
    pub background: Color,
    /// True when producing resolution-independent output (export); transient
    /// decorations such as text cursors are omitted.
    pub is_vector: bool,
}

/// A recorded drawing operation.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// See [`RenderContext::push_transform`].
    PushTransform(Affine),
    /// See [`RenderContext::pop_transform`].
    PopTransform,
    /// See [`RenderContext::push_clip`].
    PushClip(Rect),
    /// See [`RenderContext::pop_clip`].
    PopClip,
    /// See [`RenderContext::push_blend`].
    PushBlend(BlendMode),
    /// See [`RenderContext::pop_blend`].
    PopBlend,
    /// See [`RenderContext::fill`].
    Fill {
        /// Filled geometry.
        path: BezPath,
        /// Fill color.
        color: Color,
        /// Fill rule.
        rule: Fill,
    },
    /// See [`RenderContext::stroke`].
    Stroke {
        /// Stroked geometry.
        path: BezPath,
        /// Stroke parameters.
        style: Stroke,
        /// Stroke color.
        color: Color,
    },
    /// See [`RenderContext::draw_text`].
    Text {
        /// Top-left corner of the run.
        origin: Point,
        /// Text content.
        text: String,
        /// Font used.
        font: FontDesc,
        /// Text color.
        color: Color,
    },
}

/// A [`RenderContext`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// Operations in call order.
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fill operations recorded.
    pub fn fill_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Fill { .. }))
            .count()
    }

    /// Number of stroke operations recorded.
    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { .. }))
            .count()
    }
}

impl RenderContext for Recorder {
    fn push_transform(&mut self, transform: Affine) {
        self.ops.push(DrawOp::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        self.ops.push(DrawOp::PopTransform);
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(DrawOp::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(DrawOp::PopClip);
    }

    fn push_blend(&mut self, mode: BlendMode) {
        self.ops.push(DrawOp::PushBlend(mode));
    }

    fn pop_blend(&mut self) {
        self.ops.push(DrawOp::PopBlend);
    }

    fn fill(&mut self, path: &BezPath, color: Color, rule: Fill) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            color,
            rule,
        });
    }

    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            style: style.clone(),
            color,
        });
    }

    fn draw_text(&mut self, origin: Point, text: &str, font: &FontDesc, color: Color) {
        self.ops.push(DrawOp::Text {
            origin,
            text: text.into(),
            font: font.clone(),
            color,
        });
    }
}

/// True if painting with `color` would leave no mark.
pub(crate) fn is_transparent(color: Color) -> bool {
    color.components[3] <= 0.0
}
