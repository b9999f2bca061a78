// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas basics.
//!
//! Build a small molecule, edit it, drain the repaint requests, and pick items.
//!
//! Run:
//! - `RUST_LOG=gccv=trace cargo run -p gccv_demos --example canvas_basics`

use gccv::shapes::{Circle, Group, Line, Text};
use gccv::{Canvas, Shape};
use kurbo::{Point, Vec2};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut canvas = Canvas::new();
    canvas.set_gap(2.0);

    // Ethanol skeleton: two bonds and an oxygen label, grouped and shifted.
    let molecule = canvas
        .insert(None, Group::with_offset(Vec2::new(20.0, 20.0)))
        .unwrap();
    let c1_c2 = canvas
        .insert(Some(molecule), Line::new((0.0, 10.0), (17.0, 0.0)))
        .unwrap();
    let c2_o = canvas
        .insert(Some(molecule), Line::new((17.0, 0.0), (34.0, 10.0)))
        .unwrap();
    let label = canvas.text((34.0, 10.0), "OH");
    let oxygen = canvas.insert(Some(molecule), label).unwrap();
    let marker = canvas
        .insert(Some(molecule), Circle::new((17.0, 0.0), 2.0))
        .unwrap();

    println!("molecule bounds: {:?}", canvas.bounds(molecule));
    println!("initial damage: {:?}", canvas.take_damage().union_rect());

    // Stretch the second bond; its old and new footprints are repainted.
    canvas.edit(c2_o, |shape| {
        if let Shape::Line(line) = shape {
            line.end = Point::new(40.0, 12.0);
        }
    });
    canvas.move_item(oxygen, Vec2::new(6.0, 2.0));
    let damage = canvas.take_damage();
    println!("edit damage rects: {:?}", damage.dirty_rects);

    // Hide the marker: the group's bounds shrink back to the bonds and label.
    canvas.set_visible(marker, false);
    println!("bounds without marker: {:?}", canvas.bounds(molecule));

    // Picking reports the root's child; ask the group for the leaf.
    let pt = Point::new(28.0, 25.0);
    if let Some(hit) = canvas.item_at(pt) {
        let (d, leaf) = canvas.distance(hit, pt);
        println!("hit {hit:?} at distance {d}, leaf {leaf:?}");
        assert_eq!(leaf, Some(c1_c2));
    }
    assert_eq!(canvas.item_at(Point::new(200.0, 200.0)), None);

    canvas.set_zoom(2.0);
    println!("zoom damage: {:?}", canvas.take_damage().dirty_rects);
}
