// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gccv: a Kurbo-native retained-mode canvas for structure diagrams.
//!
//! Gccv keeps a tree of drawable items under a root group and takes care of
//! everything between "the model changed" and "these pixels need repainting".
//!
//! - Items are [`Shape`]s: lines, arrows, arcs, wedges, brackets, text and more,
//!   plus [`Group`]s that hold other items.
//! - Each item caches its bounds. Edits mark the cache stale up the parent
//!   chain, and the next query recomputes only what changed.
//! - Every visible change schedules a repaint of the old and new footprints in
//!   physical pixels; the host drains them as [`Damage`].
//! - Hit testing is distance based: the item nearest to the pointer wins if it
//!   is within the canvas gap, the newest item winning ties.
//! - Drawing goes through a [`RenderContext`] the host implements, so the crate
//!   itself never touches a window, a GPU or a font file.
//!
//! ## Domain objects
//!
//! Items carry an optional [`ClientId`], an opaque key into the host's own
//! model. Pointer events are routed to a single [`EventClient`] with the
//! [`ClientId`] of the item under the pointer, and domain objects that own a
//! principal item implement [`ItemClient`]. Handles are generational, so a
//! domain object holding an [`ItemId`] whose item was removed with its parent
//! sees a stale handle ([`Canvas::is_alive`] returns `false`).
//!
//! ## Coordinates
//!
//! Item geometry is logical and relative to the parent group, whose
//! [`Group::offset`] shifts all of its children. Physical pixels are logical
//! coordinates multiplied by [`Canvas::zoom`].
//!
//! ## Text
//!
//! Text runs are measured by a [`TextLayout`] supplied at construction time.
//! [`MonospaceLayout`] is a deterministic stand-in used by default.
//!
//! ## Minimal usage
//!
//! ```
//! use gccv::{Canvas, Recorder};
//! use gccv::shapes::{Circle, Group, Line};
//! use kurbo::{Point, Rect, Vec2};
//!
//! let mut canvas = Canvas::new();
//! canvas.set_gap(2.0);
//!
//! // A bond and an atom marker inside a shifted group.
//! let molecule = canvas.insert(None, Group::with_offset(Vec2::new(10.0, 10.0))).unwrap();
//! let bond = canvas.insert(Some(molecule), Line::new((0.0, 0.0), (20.0, 0.0))).unwrap();
//! let atom = canvas.insert(Some(molecule), Circle::new((20.0, 0.0), 3.0)).unwrap();
//!
//! // Group bounds are the union of the children, shifted by the offset.
//! assert_eq!(canvas.bounds(molecule), Rect::new(9.5, 6.5, 33.5, 13.5));
//!
//! // Picking returns the direct child of the root under the pointer.
//! assert_eq!(canvas.item_at(Point::new(15.0, 10.5)), Some(molecule));
//! assert_eq!(canvas.item_at(Point::new(100.0, 100.0)), None);
//! assert_eq!(canvas.distance(molecule, Point::new(15.0, 11.0)).1, Some(bond));
//!
//! // Every change above was queued for repaint.
//! assert!(!canvas.take_damage().is_empty());
//!
//! // Paint into a recording context.
//! let mut rec = Recorder::new();
//! canvas.paint(&mut rec, None);
//! assert_eq!(rec.stroke_count(), 2);
//!
//! canvas.remove(molecule).unwrap();
//! assert!(!canvas.is_alive(atom));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arrowhead;
mod canvas;
mod damage;
mod error;
mod event;
mod geom;
mod layout;
mod render;
pub mod shapes;
mod style;
mod tree;
mod types;

pub use arrowhead::{ArrowHead, ArrowHeadSize, Head};
pub use canvas::{Canvas, CanvasOptions};
pub use damage::Damage;
pub use error::SceneError;
pub use event::{
    CanvasEvent, CanvasEventKind, EventClient, ItemClient, Modifiers, PointerEvent, PointerKind,
};
pub use layout::{FontDesc, MonospaceLayout, TextLayout, TextMetrics};
pub use render::{DrawEnv, DrawOp, Recorder, RenderContext};
pub use shapes::{Group, Shape};
pub use style::{FillStyle, LineStyle};
pub use types::{ClientId, ItemFlags, ItemId, SelectionState};
