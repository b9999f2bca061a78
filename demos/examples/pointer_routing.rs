// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer routing to domain objects.
//!
//! Two atoms implement `ItemClient`; an `EventClient` selects the atom under
//! the pointer on press and drags it with the primary button held.
//!
//! Run:
//! - `cargo run -p gccv_demos --example pointer_routing`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gccv::shapes::Circle;
use gccv::{
    Canvas, CanvasEvent, ClientId, EventClient, FillStyle, ItemClient, ItemId, Modifiers,
    PointerEvent, PointerKind, SelectionState,
};
use kurbo::{Point, Vec2};
use peniko::Color;

struct Atom {
    id: ClientId,
    center: Point,
    item: Option<ItemId>,
    state: SelectionState,
}

impl ItemClient for Atom {
    fn item(&self) -> Option<ItemId> {
        self.item
    }

    fn set_item(&mut self, item: Option<ItemId>) {
        self.item = item;
    }

    fn add_item(&mut self, canvas: &mut Canvas) {
        let mut disc = Circle::new(self.center, 6.0);
        disc.fill = FillStyle::solid(Color::WHITE);
        let item = canvas.insert(None, disc).ok();
        if let Some(item) = item {
            canvas.set_client(item, Some(self.id));
        }
        self.set_item(item);
    }

    fn set_selected(&mut self, canvas: &mut Canvas, state: SelectionState) {
        self.state = state;
        let Some(item) = self.live_item(canvas) else {
            return;
        };
        let color = match state {
            SelectionState::Selected => Color::from_rgb8(0x40, 0x80, 0xff),
            _ => Color::BLACK,
        };
        canvas.edit(item, |shape| {
            if let Some(line) = shape.line_style_mut() {
                line.color = color;
            }
        });
    }
}

type Atoms = Rc<RefCell<HashMap<ClientId, Atom>>>;

struct Tool {
    atoms: Atoms,
    selected: Option<ClientId>,
    last: Point,
}

impl Tool {
    fn select(&mut self, canvas: &mut Canvas, client: Option<ClientId>) {
        let mut atoms = self.atoms.borrow_mut();
        if let Some(old) = self.selected.and_then(|id| atoms.get_mut(&id)) {
            old.set_selected(canvas, SelectionState::Unselected);
        }
        if let Some(new) = client.and_then(|id| atoms.get_mut(&id)) {
            new.set_selected(canvas, SelectionState::Selected);
        }
        self.selected = client;
    }
}

impl EventClient for Tool {
    fn on_button_pressed(&mut self, canvas: &mut Canvas, event: &CanvasEvent) -> bool {
        self.select(canvas, event.client);
        self.last = event.position;
        event.client.is_some()
    }

    fn on_drag(&mut self, canvas: &mut Canvas, event: &CanvasEvent) -> bool {
        let Some(item) = self
            .selected
            .and_then(|id| self.atoms.borrow().get(&id).and_then(|a| a.live_item(canvas)))
        else {
            return false;
        };
        let delta: Vec2 = event.position - self.last;
        canvas.move_item(item, delta);
        self.last = event.position;
        true
    }
}

fn main() {
    let mut canvas = Canvas::new();
    canvas.set_zoom(2.0);
    canvas.set_gap(1.0);

    let atoms: Atoms = Rc::default();
    for (n, center) in [Point::new(20.0, 20.0), Point::new(60.0, 20.0)]
        .into_iter()
        .enumerate()
    {
        let id = ClientId(n as u64);
        let mut atom = Atom {
            id,
            center,
            item: None,
            state: SelectionState::Unselected,
        };
        atom.add_item(&mut canvas);
        atoms.borrow_mut().insert(id, atom);
    }
    canvas.set_event_client(Some(Box::new(Tool {
        atoms: atoms.clone(),
        selected: None,
        last: Point::ZERO,
    })));

    // Physical pixels: the zoom halves them into logical units.
    let (pressed, handled) =
        canvas.handle_pointer(PointerEvent::new(PointerKind::Press(1), (40.0, 40.0)));
    println!("press: {pressed:?} handled={handled}");

    let drag =
        PointerEvent::new(PointerKind::Motion, (60.0, 50.0)).with_modifiers(Modifiers::BUTTON1);
    let (dragged, handled) = canvas.handle_pointer(drag);
    println!("drag: {:?} handled={handled}", dragged.kind);

    let first = atoms.borrow()[&ClientId(0)].item.unwrap();
    println!("dragged atom bounds: {:?}", canvas.bounds(first));
    println!("state: {:?}", atoms.borrow()[&ClientId(0)].state);

    let (left, _) = canvas.handle_pointer(PointerEvent::new(PointerKind::Leave, (0.0, 0.0)));
    assert_eq!(left.item, None);

    // Removing through the client leaves no stale principal item behind.
    let mut atoms = atoms.borrow_mut();
    if let Some(atom) = atoms.get_mut(&ClientId(1)) {
        atom.remove_item(&mut canvas);
        assert!(atom.live_item(&canvas).is_none());
    }
    println!("items left: {}", canvas.item_count());
}
