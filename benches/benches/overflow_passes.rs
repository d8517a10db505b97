// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_flow_tree::{BoxStyle, NodeId, Tag, Tree};
use understory_overflow::adapters::flow_tree::settle;
use understory_overflow::{Options, Overflow, fit};

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

fn gen_widths(count: usize, min: f64, max: f64) -> Vec<f64> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| min + rng.next_f64() * (max - min))
        .collect()
}

fn gen_row(widths: &[f64], row_width: f64) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let body = tree.body();
    let nav = tree.insert(body, Tag::Div, BoxStyle::fixed(row_width, 30.0));
    for &w in widths {
        tree.insert(nav, Tag::Span, BoxStyle::fixed(w, 30.0));
    }
    (tree, nav)
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    for &n in &[16usize, 256, 4096] {
        let widths = gen_widths(n, 40.0, 160.0);
        let total: f64 = widths.iter().sum();
        group.throughput(Throughput::Elements(n as u64));
        for (name, row) in [("all_fit", total + 1.0), ("half_fit", total * 0.5)] {
            group.bench_function(format!("{name}_n{n}"), |b| {
                b.iter(|| black_box(fit(black_box(row), 48.0, widths.iter().copied())))
            });
        }
    }
    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    for &n in &[16usize, 128] {
        let widths = gen_widths(n, 40.0, 160.0);
        let total: f64 = widths.iter().sum();
        group.throughput(Throughput::Elements(n as u64));
        for (name, options) in [
            ("inline", Options::default()),
            (
                "popover_move",
                Options {
                    popover: true,
                    ..Default::default()
                },
            ),
            (
                "popover_clone",
                Options {
                    popover: true,
                    clone: true,
                    ..Default::default()
                },
            ),
        ] {
            group.bench_function(format!("{name}_steady_n{n}"), |b| {
                let (mut tree, nav) = gen_row(&widths, total * 0.5);
                let mut overflow = Overflow::new(&mut tree, nav, options.clone());
                b.iter(|| {
                    overflow.recompute(&mut tree);
                    black_box(overflow.visible_count());
                })
            });
            group.bench_function(format!("{name}_resize_sweep_n{n}"), |b| {
                b.iter_batched(
                    || {
                        let (mut tree, nav) = gen_row(&widths, total);
                        let overflow = Overflow::new(&mut tree, nav, options.clone());
                        (tree, nav, overflow)
                    },
                    |(mut tree, nav, mut overflow)| {
                        for step in 1..=8_u32 {
                            tree.set_width(nav, total * (1.0 - f64::from(step) / 10.0));
                            settle(&mut tree, &mut overflow);
                        }
                        black_box(overflow.overflow().len());
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_fit, bench_recompute);
criterion_main!(benches);
