// Copyright 2025 the Gccv Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gccv::shapes::{Circle, Group, Line};
use gccv::{Canvas, ItemId, Shape};
use kurbo::{Point, Vec2};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A grid of "molecules": each is a group holding a ring of bonds and atoms.
fn build_scene(n: usize) -> (Canvas, Vec<ItemId>) {
    let mut canvas = Canvas::new();
    canvas.set_gap(3.0);
    let mut atoms = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let offset = Vec2::new(x as f64 * 60.0, y as f64 * 60.0);
            let molecule = canvas.insert(None, Group::with_offset(offset)).unwrap();
            let ring: Vec<Point> = (0..6)
                .map(|k| {
                    let a = k as f64 * core::f64::consts::FRAC_PI_3;
                    Point::new(25.0 + 15.0 * a.cos(), 25.0 + 15.0 * a.sin())
                })
                .collect();
            for k in 0..6 {
                let bond = Line::new(ring[k], ring[(k + 1) % 6]);
                canvas.insert(Some(molecule), bond).unwrap();
                let atom = canvas.insert(Some(molecule), Circle::new(ring[k], 2.0)).unwrap();
                atoms.push(atom);
            }
        }
    }
    (canvas, atoms)
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for &n in &[8usize, 16, 32] {
        let (mut canvas, _) = build_scene(n);
        let root = canvas.root();
        let extent = canvas.bounds(root);
        let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
        let probes: Vec<Point> = (0..256)
            .map(|_| {
                Point::new(
                    extent.x0 + rng.next_f64() * extent.width(),
                    extent.y0 + rng.next_f64() * extent.height(),
                )
            })
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("item_at_n{}", n), |b| {
            b.iter(|| {
                let hits = probes
                    .iter()
                    .filter(|pt| canvas.item_at(**pt).is_some())
                    .count();
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds");
    for &n in &[8usize, 16, 32] {
        group.throughput(Throughput::Elements((n * n * 12) as u64));
        group.bench_function(format!("full_recompute_n{}", n), |b| {
            b.iter_batched(
                || build_scene(n).0,
                |mut canvas| {
                    let root = canvas.root();
                    black_box(canvas.bounds(root));
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("edit_one_atom_n{}", n), |b| {
            b.iter_batched(
                || build_scene(n),
                |(mut canvas, atoms)| {
                    let atom = atoms[atoms.len() / 2];
                    let root = canvas.root();
                    canvas.bounds(root);
                    canvas.edit(atom, |shape| {
                        if let Shape::Circle(circle) = shape {
                            circle.radius = 4.0;
                        }
                    });
                    black_box(canvas.bounds(root));
                    black_box(canvas.take_damage());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_bounds);
criterion_main!(benches);
