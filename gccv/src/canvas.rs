// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canvas: item storage root, zoom and gap, repaint accounting, and the
//! paint walk.

use alloc::boxed::Box;
use alloc::string::String;
use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;

use crate::damage::Damage;
use crate::event::{EventClient, Modifiers};
use crate::layout::{FontDesc, MonospaceLayout, TextLayout};
use crate::render::{DrawEnv, RenderContext};
use crate::shapes::{Group, Shape, Text};
use crate::tree::{Arena, normal_blend};
use crate::types::ItemId;

/// Initial canvas settings.
#[derive(Clone, Debug)]
pub struct CanvasOptions {
    /// Logical to physical scale; must be finite and positive.
    pub zoom: f64,
    /// Maximum distance at which a pointer still hits an item, in logical units.
    pub gap: f64,
    /// Color for strokes that ask for the automatic color.
    pub foreground: Color,
    /// Color for fills that ask for the automatic color.
    pub background: Color,
    /// Font given to text created through [`Canvas::text`].
    pub font: FontDesc,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            gap: 0.0,
            foreground: Color::BLACK,
            background: Color::WHITE,
            font: FontDesc::default(),
        }
    }
}

/// A retained 2D scene of items under one root group.
///
/// Item coordinates are logical; physical pixels are logical coordinates
/// multiplied by the zoom factor. Repaint requests accumulate as pixel
/// rectangles until the host drains them with [`Canvas::take_damage`].
pub struct Canvas {
    pub(crate) items: Arena,
    pub(crate) root: ItemId,
    pub(crate) layout: Box<dyn TextLayout>,
    zoom: f64,
    gap: f64,
    foreground: Color,
    background: Color,
    font: FontDesc,
    damage: Damage,
    pub(crate) last_modifiers: Modifiers,
    pub(crate) event_client: Option<Box<dyn EventClient>>,
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("items_alive", &self.items.alive())
            .field("root", &self.root)
            .field("zoom", &self.zoom)
            .field("gap", &self.gap)
            .field("pending_damage", &self.damage.dirty_rects.len())
            .field("has_event_client", &self.event_client.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Canvas with default options and a [`MonospaceLayout`].
    pub fn new() -> Self {
        Self::with_options(CanvasOptions::default(), MonospaceLayout::default())
    }

    /// Canvas measuring text with `layout`.
    ///
    /// Invalid zoom or gap values in `options` fall back to their defaults.
    pub fn with_options(options: CanvasOptions, layout: impl TextLayout + 'static) -> Self {
        let mut items = Arena::default();
        let root = items.alloc(None, Shape::Group(Group::new()));
        let mut canvas = Self {
            items,
            root,
            layout: Box::new(layout),
            zoom: 1.0,
            gap: 0.0,
            foreground: options.foreground,
            background: options.background,
            font: options.font,
            damage: Damage::default(),
            last_modifiers: Modifiers::empty(),
            event_client: None,
        };
        canvas.set_zoom(options.zoom);
        canvas.set_gap(options.gap);
        canvas.damage = Damage::default();
        canvas
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Change the zoom factor, repainting the scene at both scales.
    ///
    /// Non-finite or non-positive values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            tracing::warn!(zoom, "ignoring invalid zoom factor");
            return;
        }
        self.invalidate(self.root);
        self.zoom = zoom;
        self.invalidate(self.root);
        tracing::debug!(zoom, "zoom changed");
    }

    /// Hit tolerance in logical units.
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Change the hit tolerance. Negative values clamp to zero.
    pub fn set_gap(&mut self, gap: f64) {
        if gap.is_nan() || gap < 0.0 {
            tracing::warn!(gap, "clamping hit gap to zero");
            self.gap = 0.0;
            return;
        }
        self.gap = gap;
    }

    /// Color used by strokes with [`LineStyle::auto_color`](crate::LineStyle::auto_color).
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Change the automatic stroke color and repaint.
    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
        self.invalidate(self.root);
    }

    /// Color used by fills with [`FillStyle::auto_color`](crate::FillStyle::auto_color).
    pub fn background(&self) -> Color {
        self.background
    }

    /// Change the automatic fill color and repaint.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.invalidate(self.root);
    }

    /// Font given to new text runs.
    pub fn font(&self) -> &FontDesc {
        &self.font
    }

    /// Change the font given to new text runs. Existing runs keep theirs.
    pub fn set_font(&mut self, font: FontDesc) {
        self.font = font;
    }

    /// A text run in the canvas font, ready for [`Canvas::insert`].
    pub fn text(&self, position: impl Into<Point>, text: impl Into<String>) -> Text {
        let mut run = Text::new(position, text);
        run.font = self.font.clone();
        run
    }

    // --- repaint ---

    /// Schedule a repaint of a logical rectangle.
    ///
    /// Negative coordinates are clamped to zero, the rectangle is scaled by
    /// the zoom factor and rounded out to whole pixels.
    pub fn invalidate_rect(&mut self, rect: Rect) {
        let rect = rect.abs();
        let x0 = rect.x0.max(0.0);
        let y0 = rect.y0.max(0.0);
        let clamped = Rect::new(x0, y0, rect.x1.max(x0), rect.y1.max(y0));
        let pixels = scale(clamped, self.zoom).expand();
        if pixels.is_zero_area() {
            return;
        }
        tracing::trace!(?pixels, "repaint requested");
        self.damage.push(pixels);
    }

    /// Pending repaint requests, in physical pixels.
    pub fn damage(&self) -> &Damage {
        &self.damage
    }

    /// Drain the pending repaint requests.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    // --- picking ---

    /// Item under a logical point, within the gap tolerance.
    ///
    /// The search runs over the root group's children; the newest child wins
    /// among equally distant candidates.
    pub fn item_at(&self, pt: Point) -> Option<ItemId> {
        let (distance, item) = self.distance(self.root, pt);
        if distance > self.gap {
            return None;
        }
        item
    }

    // --- painting ---

    fn env(&self, is_vector: bool) -> DrawEnv {
        DrawEnv {
            foreground: self.foreground,
            background: self.background,
            is_vector,
        }
    }

    /// Paint the scene for the host's expose handler.
    ///
    /// `dirty` is the exposed region in physical pixels, or `None` to repaint
    /// everything. Only items whose bounds meet the region are drawn.
    pub fn paint(&mut self, ctx: &mut dyn RenderContext, dirty: Option<Rect>) {
        let root = self.root;
        let full = self.bounds(root);
        let clip = match dirty {
            Some(pixels) => scale(pixels, 1.0 / self.zoom),
            None => full,
        };
        let env = self.env(false);
        ctx.push_transform(Affine::scale(self.zoom));
        ctx.push_clip(clip);
        self.draw_child(root, ctx, clip, &env);
        ctx.pop_clip();
        ctx.pop_transform();
    }

    /// Draw the whole scene in logical units, without clipping.
    ///
    /// Used for export; `is_vector` suppresses transient decorations.
    pub fn render(&mut self, ctx: &mut dyn RenderContext, is_vector: bool) {
        let root = self.root;
        let full = self.bounds(root);
        let env = self.env(is_vector);
        self.draw_child(root, ctx, full, &env);
    }

    /// Draw one item if it is visible and meets `clip`, wrapping it in its
    /// composition operator.
    fn draw_child(&self, id: ItemId, ctx: &mut dyn RenderContext, clip: Rect, env: &DrawEnv) {
        let Some(item) = self.items.get(id) else {
            return;
        };
        if !item.is_visible() {
            return;
        }
        // Bounds are fresh here: painting refreshes the tree first.
        let Some(bounds) = item.extent else {
            return;
        };
        if !overlaps(bounds, clip) {
            return;
        }
        let blended = item.operator != normal_blend();
        if blended {
            ctx.push_blend(item.operator);
        }
        if !self.draw_clipped(id, ctx, clip, env) {
            item.shape.draw_leaf(ctx, env);
        }
        if blended {
            ctx.pop_blend();
        }
    }

    /// Clipped draw. Groups dispatch to their children and report `true`;
    /// leaves report `false` so the caller falls back to the unclipped draw.
    fn draw_clipped(
        &self,
        id: ItemId,
        ctx: &mut dyn RenderContext,
        clip: Rect,
        env: &DrawEnv,
    ) -> bool {
        let Some(group) = self.items.get(id).and_then(|item| item.shape.as_group()) else {
            return false;
        };
        let shifted = group.offset != Vec2::ZERO;
        if shifted {
            ctx.push_transform(Affine::translate(group.offset));
        }
        let local = clip - group.offset;
        for &child in group.children() {
            self.draw_child(child, ctx, local, env);
        }
        if shifted {
            ctx.pop_transform();
        }
        true
    }
}

fn scale(rect: Rect, k: f64) -> Rect {
    Rect::new(rect.x0 * k, rect.y0 * k, rect.x1 * k, rect.y1 * k)
}

/// Closed-interval overlap, so zero-width bounds of straight strokes still meet.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawOp, Recorder};
    use crate::shapes::{Circle, Line, Rectangle};
    use peniko::{BlendMode, Compose, Mix};

    fn outlined_square() -> Rectangle {
        let mut r = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        r.line.width = 2.0;
        r
    }

    #[test]
    fn invalidate_rect_clamps_scales_and_rounds_out() {
        let mut canvas = Canvas::new();
        canvas.set_zoom(2.0);
        canvas.take_damage();
        canvas.invalidate_rect(Rect::new(-3.0, 1.2, 4.1, 5.0));
        assert_eq!(
            canvas.take_damage().dirty_rects,
            [Rect::new(0.0, 2.0, 9.0, 10.0)]
        );
        canvas.invalidate_rect(Rect::new(-5.0, -5.0, -1.0, -1.0));
        assert!(canvas.damage().is_empty(), "entirely off-canvas");
    }

    #[test]
    fn invalidate_twice_repaints_the_same_region() {
        let mut canvas = Canvas::new();
        let r = canvas.insert(None, outlined_square()).unwrap();
        canvas.take_damage();
        canvas.invalidate(r);
        canvas.invalidate(r);
        let damage = canvas.take_damage();
        assert_eq!(damage.dirty_rects.len(), 2);
        assert_eq!(damage.dirty_rects[0], damage.dirty_rects[1]);
        assert_eq!(damage.dirty_rects[0], Rect::new(0.0, 0.0, 11.0, 11.0));
    }

    #[test]
    fn zoom_repaints_old_and_new_footprints() {
        let mut canvas = Canvas::new();
        canvas.insert(None, outlined_square()).unwrap();
        canvas.take_damage();
        canvas.set_zoom(2.0);
        assert_eq!(
            canvas.take_damage().dirty_rects,
            [
                Rect::new(0.0, 0.0, 11.0, 11.0),
                Rect::new(0.0, 0.0, 22.0, 22.0)
            ]
        );
        canvas.set_zoom(-1.0);
        canvas.set_zoom(f64::NAN);
        assert_eq!(canvas.zoom(), 2.0);
    }

    #[test]
    fn gap_controls_picking() {
        let mut canvas = Canvas::new();
        canvas.set_gap(2.0);
        let r = canvas.insert(None, outlined_square()).unwrap();
        assert_eq!(canvas.item_at(Point::new(20.0, 20.0)), None);
        assert_eq!(canvas.item_at(Point::new(12.5, 5.0)), Some(r));
        assert_eq!(canvas.item_at(Point::new(5.0, 5.0)), None, "unfilled interior");
        canvas.set_gap(-4.0);
        assert_eq!(canvas.gap(), 0.0);
    }

    #[test]
    fn options_are_validated() {
        let canvas = Canvas::with_options(
            CanvasOptions {
                zoom: 0.0,
                gap: 3.0,
                ..Default::default()
            },
            MonospaceLayout::default(),
        );
        assert_eq!(canvas.zoom(), 1.0);
        assert_eq!(canvas.gap(), 3.0);
        assert!(canvas.damage().is_empty());
    }

    #[test]
    fn paint_skips_items_outside_the_dirty_region() {
        let mut canvas = Canvas::new();
        canvas.insert(None, outlined_square()).unwrap();
        let mut far = Circle::new((100.0, 100.0), 5.0);
        far.fill.color = Color::BLACK;
        canvas.insert(None, far).unwrap();

        let mut rec = Recorder::new();
        canvas.paint(&mut rec, None);
        assert_eq!(rec.stroke_count(), 2);
        assert_eq!(rec.fill_count(), 1);

        let mut rec = Recorder::new();
        canvas.paint(&mut rec, Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert_eq!(rec.stroke_count(), 1);
        assert_eq!(rec.fill_count(), 0);
    }

    #[test]
    fn hidden_items_are_not_drawn() {
        let mut canvas = Canvas::new();
        let r = canvas.insert(None, outlined_square()).unwrap();
        canvas.set_visible(r, false);
        let mut rec = Recorder::new();
        canvas.render(&mut rec, true);
        assert_eq!(rec.stroke_count(), 0);
    }

    #[test]
    fn draw_order_is_oldest_first_and_blend_is_scoped() {
        let mut canvas = Canvas::new();
        let first = canvas.insert(None, Line::new((0.0, 0.0), (10.0, 0.0))).unwrap();
        canvas.insert(None, outlined_square()).unwrap();
        canvas.set_operator(first, BlendMode::new(Mix::Multiply, Compose::SrcOver));
        let mut rec = Recorder::new();
        canvas.render(&mut rec, true);
        assert!(matches!(rec.ops[0], DrawOp::PushBlend(_)));
        assert!(matches!(rec.ops[1], DrawOp::Stroke { .. }));
        assert!(matches!(rec.ops[2], DrawOp::PopBlend));
        assert!(matches!(rec.ops[3], DrawOp::Stroke { .. }));
    }

    #[test]
    fn group_offset_becomes_a_transform() {
        let mut canvas = Canvas::new();
        let g = canvas
            .insert(None, Group::with_offset(Vec2::new(50.0, 0.0)))
            .unwrap();
        canvas.insert(Some(g), outlined_square()).unwrap();
        let mut rec = Recorder::new();
        canvas.paint(&mut rec, Some(Rect::new(50.0, 0.0, 60.0, 10.0)));
        assert_eq!(rec.stroke_count(), 1);
        assert!(rec.ops.iter().any(|op| matches!(
            op,
            DrawOp::PushTransform(t) if *t == Affine::translate((50.0, 0.0))
        )));
    }

    #[test]
    fn text_uses_the_canvas_font() {
        let mut canvas = Canvas::new();
        canvas.set_font(FontDesc::new("Serif", 20.0));
        let t = canvas.text((0.0, 0.0), "Hi");
        assert_eq!(t.font.family, "Serif");
        let id = canvas.insert(None, t).unwrap();
        assert!(canvas.bounds(id).width() > 0.0);
    }
}
