// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the pure hot paths of the order engine:
// page-range evaluation and order pricing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use druckhaus_core::{ColorMode, PageSelection, PriceList, PrintOptions, Sides};
use druckhaus_orders::{pages, pricing};

/// Benchmark page-range evaluation over expressions of growing length.
///
/// Long comma-separated expressions are what a customer printing excerpts
/// from a large document submits; evaluation happens on every quote.
fn bench_billable_pages(c: &mut Criterion) {
    let cases: &[(&str, usize)] = &[("10 tokens", 10), ("100 tokens", 100), ("1000 tokens", 1000)];

    let mut group = c.benchmark_group("billable_pages_custom");
    for &(label, tokens) in cases {
        let ranges = (0..tokens)
            .map(|n| format!("{}-{}", n * 3 + 1, n * 3 + 2))
            .collect::<Vec<_>>()
            .join(",");
        let selection = PageSelection::Custom { ranges };

        group.bench_function(label, |b| {
            b.iter(|| {
                let pages = pages::billable_pages(black_box(&selection), black_box(5000));
                black_box(pages);
            });
        });
    }
    group.finish();
}

/// Benchmark the full quote computation (evaluate + price).
fn bench_order_total(c: &mut Criterion) {
    let prices = PriceList::default();
    let options = PrintOptions {
        color: ColorMode::Color,
        sides: Sides::Double,
        pages: PageSelection::Custom {
            ranges: "1-25,30,40-80,99".into(),
        },
        copies: 3,
        ..PrintOptions::default()
    };

    c.bench_function("quote (evaluate + price)", |b| {
        b.iter(|| {
            let billable = pages::billable_pages(black_box(&options.pages), black_box(120));
            let total = pricing::order_total(black_box(&prices), black_box(&options), billable);
            black_box(total);
        });
    });
}

criterion_group!(benches, bench_billable_pages, bench_order_total);
criterion_main!(benches);
