//! Solver benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use folio_layout::prelude::*;

/// A page of `count` boxes that float into rows below each other.
fn flow_page(count: usize) -> Page {
    let mut page = Page::new(600.0, 100_000.0).with_padding(Sides::uniform(20.0));
    for index in 0..count {
        let width = 40.0 + (index % 7) as f64 * 10.0;
        page.add_to_root(
            Element::rect(width, 30.0)
                .at(index as f64 * 3.0, 500.0)
                .with_margin(Sides::uniform(2.0))
                .with_condition(Align::left_to_left())
                .with_condition(Float::top()),
        )
        .expect("fresh element");
    }
    page
}

/// Boxes spread over a 12 column grid, stacked per column.
fn column_page(count: usize) -> Page {
    let grid = ColumnGrid::uniform_columns(12, 40.0, 5.0).expect("valid grid");
    let mut page = Page::new(575.0, 800.0)
        .with_padding(Sides::uniform(20.0))
        .with_grid(grid);
    for index in 0..count {
        page.add_to_root(
            Element::rect(20.0, 20.0)
                .with_condition(GridPlacement::fit_column_span(index % 10, 2))
                .with_condition(Float::top()),
        )
        .expect("fresh element");
    }
    page
}

fn solve_flow(c: &mut Criterion) {
    c.bench_function("solve_flow_100", |b| {
        b.iter_batched(
            || flow_page(100),
            |mut page| solve_page(black_box(&mut page)),
            BatchSize::SmallInput,
        )
    });
}

fn solve_columns(c: &mut Criterion) {
    c.bench_function("solve_columns_60", |b| {
        b.iter_batched(
            || column_page(60),
            |mut page| solve_page(black_box(&mut page)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, solve_flow, solve_columns);
criterion_main!(benches);
