// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer routing and the client contracts.
//!
//! The host windowing layer feeds [`PointerEvent`]s in physical pixels to
//! [`Canvas::handle_pointer`]. The canvas converts them to logical
//! coordinates, hit-tests with the configured gap, and hands the registered
//! [`EventClient`] a [`CanvasEvent`] that names the [`ClientId`] under the
//! pointer rather than any canvas-internal item.
//!
//! Domain objects that own a principal item implement [`ItemClient`].

use alloc::boxed::Box;
use kurbo::Point;

use crate::canvas::Canvas;
use crate::types::{ClientId, ItemId, SelectionState};

bitflags::bitflags! {
    /// Keyboard modifiers and held pointer buttons at the time of an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CONTROL = 1 << 1;
        /// Alt key.
        const ALT = 1 << 2;
        /// Super (logo) key.
        const SUPER = 1 << 3;
        /// Primary button held.
        const BUTTON1 = 1 << 8;
        /// Middle button held.
        const BUTTON2 = 1 << 9;
        /// Secondary button held.
        const BUTTON3 = 1 << 10;
        /// Any button held.
        const BUTTONS = Self::BUTTON1.bits() | Self::BUTTON2.bits() | Self::BUTTON3.bits();
    }
}

/// What happened to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Button pressed (1 = primary).
    Press(u8),
    /// Button released.
    Release(u8),
    /// Pointer moved.
    Motion,
    /// Pointer left the canvas.
    Leave,
}

/// Raw pointer event from the host, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Position in physical pixels.
    pub position: Point,
    /// Modifier and button state.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Event of `kind` at `position` with no modifiers.
    pub fn new(kind: PointerKind, position: impl Into<Point>) -> Self {
        Self {
            kind,
            position: position.into(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Same event with `modifiers`.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Pointer notification as seen by domain code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasEventKind {
    /// Button pressed.
    ButtonPressed(u8),
    /// Button released.
    ButtonReleased(u8),
    /// Motion without a held button.
    Motion,
    /// Motion with at least one held button.
    Drag,
    /// Pointer left the canvas.
    Leave,
}

/// A resolved pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasEvent {
    /// What happened.
    pub kind: CanvasEventKind,
    /// Position in logical (unzoomed) coordinates.
    pub position: Point,
    /// Item within the gap of the pointer, if any.
    pub item: Option<ItemId>,
    /// Domain object associated with that item, if any.
    pub client: Option<ClientId>,
    /// Modifier and button state.
    pub modifiers: Modifiers,
}

/// Receives pointer notifications from a [`Canvas`].
///
/// Every hook returns whether it consumed the event. The default
/// implementations ignore everything.
pub trait EventClient {
    /// A button was pressed.
    fn on_button_pressed(&mut self, canvas: &mut Canvas, event: &CanvasEvent) -> bool {
        let _ = (canvas, event);
        false
    }

    /// A button was released.
    fn on_button_released(&mut self, canvas: &mut Canvas, event: &CanvasEvent) -> bool {
        let _ = (canvas, event);
        false
    }

    /// The pointer moved with no button held.
    fn on_motion(&mut self, canvas: &mut Canvas, event: &CanvasEvent) -> bool {
        let _ = (canvas, event);
        false
    }

    /// The pointer moved with a button held.
    fn on_drag(&mut self, canvas: &mut Canvas, event: &CanvasEvent) -> bool {
        let _ = (canvas, event);
        false
    }

    /// The pointer left the canvas.
    fn on_leave(&mut self, canvas: &mut Canvas, event: &CanvasEvent) -> bool {
        let _ = (canvas, event);
        false
    }
}

/// A domain object represented on the canvas by one principal item.
///
/// The principal item is usually a group holding several shapes. The canvas
/// never calls back into clients; domain code drives these hooks and the
/// canvas only reports which [`ClientId`] is under the pointer.
pub trait ItemClient {
    /// Principal item, as last recorded.
    fn item(&self) -> Option<ItemId>;

    /// Record the principal item.
    fn set_item(&mut self, item: Option<ItemId>);

    /// Create the representation on `canvas` and record it with [`ItemClient::set_item`].
    fn add_item(&mut self, canvas: &mut Canvas);

    /// Bring the representation in line with the domain state.
    fn update_item(&mut self, canvas: &mut Canvas) {
        let _ = canvas;
    }

    /// Reflect a change of selection state.
    fn set_selected(&mut self, canvas: &mut Canvas, state: SelectionState) {
        let _ = (canvas, state);
    }

    /// Principal item if it is still alive.
    ///
    /// The item may have been removed together with an ancestor group; its
    /// handle then goes stale instead of dangling.
    fn live_item(&self, canvas: &Canvas) -> Option<ItemId> {
        self.item().filter(|id| canvas.is_alive(*id))
    }

    /// Remove the principal item (and its subtree) and forget it.
    fn remove_item(&mut self, canvas: &mut Canvas) {
        if let Some(id) = self.live_item(canvas) {
            // Liveness was just checked and the root is never a principal item.
            let _ = canvas.remove(id);
        }
        self.set_item(None);
    }
}

impl Canvas {
    /// Register the receiver of pointer notifications, returning the previous one.
    pub fn set_event_client(
        &mut self,
        client: Option<Box<dyn EventClient>>,
    ) -> Option<Box<dyn EventClient>> {
        core::mem::replace(&mut self.event_client, client)
    }

    /// Modifier state of the last pointer event.
    pub fn last_modifiers(&self) -> Modifiers {
        self.last_modifiers
    }

    /// Resolve a host pointer event and forward it to the event client.
    ///
    /// Returns the resolved event and whether the client consumed it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> (CanvasEvent, bool) {
        let zoom = self.zoom();
        let position = Point::new(event.position.x / zoom, event.position.y / zoom);
        self.last_modifiers = event.modifiers;
        let kind = match event.kind {
            PointerKind::Press(button) => CanvasEventKind::ButtonPressed(button),
            PointerKind::Release(button) => CanvasEventKind::ButtonReleased(button),
            PointerKind::Motion if event.modifiers.intersects(Modifiers::BUTTONS) => {
                CanvasEventKind::Drag
            }
            PointerKind::Motion => CanvasEventKind::Motion,
            PointerKind::Leave => CanvasEventKind::Leave,
        };
        let item = match kind {
            CanvasEventKind::Leave => None,
            _ => self.item_at(position),
        };
        let resolved = CanvasEvent {
            kind,
            position,
            item,
            client: item.and_then(|id| self.client_of(id)),
            modifiers: event.modifiers,
        };
        let handled = match self.event_client.take() {
            Some(mut client) => {
                let handled = match kind {
                    CanvasEventKind::ButtonPressed(_) => client.on_button_pressed(self, &resolved),
                    CanvasEventKind::ButtonReleased(_) => {
                        client.on_button_released(self, &resolved)
                    }
                    CanvasEventKind::Motion => client.on_motion(self, &resolved),
                    CanvasEventKind::Drag => client.on_drag(self, &resolved),
                    CanvasEventKind::Leave => client.on_leave(self, &resolved),
                };
                // The hook may have installed a replacement.
                if self.event_client.is_none() {
                    self.event_client = Some(client);
                }
                handled
            }
            None => false,
        };
        tracing::trace!(?resolved, handled, "pointer event");
        (resolved, handled)
    }
}
