// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector export through a recording context.
//!
//! Renders a scene with `is_vector` set (no editing cursor, no control
//! guides), then prints the recorded operations as a tiny SVG document.
//!
//! Run:
//! - `cargo run -p gccv_demos --example export_recorder`

use std::fmt::Write as _;

use gccv::shapes::{Anchor, Arc, BezierArrow, Brackets, BracketsKind, Hash, Wedge};
use gccv::{ArrowHead, Canvas, DrawOp, Recorder};
use kurbo::{Point, Rect};

fn main() {
    let mut canvas = Canvas::new();

    let mut arrow = BezierArrow::new([
        Point::new(10.0, 60.0),
        Point::new(30.0, 10.0),
        Point::new(70.0, 10.0),
        Point::new(90.0, 60.0),
    ]);
    arrow.show_controls = true;
    canvas.insert(None, arrow).unwrap();
    canvas.insert(None, Wedge::new((10.0, 100.0), (50.0, 100.0), 6.0)).unwrap();
    canvas.insert(None, Hash::new((60.0, 100.0), (100.0, 100.0), 6.0)).unwrap();
    let mut arc = Arc::new((150.0, 60.0), 20.0, 0.0, 4.0);
    arc.head = ArrowHead::Full;
    canvas.insert(None, arc).unwrap();
    canvas
        .insert(None, Brackets::new(Rect::new(120.0, 90.0, 180.0, 130.0), BracketsKind::Round))
        .unwrap();
    let mut label = canvas.text((150.0, 110.0), "n");
    label.anchor = Anchor::Center;
    label.editing = true;
    canvas.insert(None, label).unwrap();

    let root = canvas.root();
    let extent = canvas.bounds(root);
    let mut rec = Recorder::new();
    canvas.render(&mut rec, true);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        extent.x0,
        extent.y0,
        extent.width(),
        extent.height()
    );
    for op in &rec.ops {
        match op {
            DrawOp::Fill { path, .. } => {
                let _ = writeln!(svg, r#"  <path d="{}" fill="black"/>"#, path.to_svg());
            }
            DrawOp::Stroke { path, style, .. } => {
                let _ = writeln!(
                    svg,
                    r#"  <path d="{}" fill="none" stroke="black" stroke-width="{}"/>"#,
                    path.to_svg(),
                    style.width
                );
            }
            DrawOp::Text { origin, text, font, .. } => {
                let _ = writeln!(
                    svg,
                    r#"  <text x="{}" y="{}" font-family="{}" font-size="{}">{}</text>"#,
                    origin.x,
                    origin.y + font.size,
                    font.family,
                    font.size,
                    text
                );
            }
            _ => {}
        }
    }
    svg.push_str("</svg>\n");
    print!("{svg}");
    println!(
        "<!-- {} fills, {} strokes -->",
        rec.fill_count(),
        rec.stroke_count()
    );
}
