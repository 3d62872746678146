//! Benchmarks for table summarization and schema annotation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use sql_brief::analyzers::ColumnProfiler;
use sql_brief::prelude::*;

/// Builds an order-lines table with `rows` rows: a low-cardinality status, a
/// high-cardinality comment and two numeric columns.
fn order_lines(rows: usize) -> Table {
    let statuses = ["open", "shipped", "returned"];
    let status: Vec<&str> = (0..rows).map(|i| statuses[i % statuses.len()]).collect();
    let comment: Vec<String> = (0..rows).map(|i| format!("comment {}", i % 997)).collect();
    let quantity: Vec<Option<i64>> = (0..rows)
        .map(|i| if i % 50 == 0 { None } else { Some((i % 40) as i64) })
        .collect();
    let price: Vec<f64> = (0..rows).map(|i| ((i * 7919) % 10_000) as f64 / 100.0).collect();

    Table::from_columns(
        "order_lines",
        vec![
            ("status", Arc::new(StringArray::from(status)) as ArrayRef),
            ("comment", Arc::new(StringArray::from(comment)) as ArrayRef),
            ("quantity", Arc::new(Int64Array::from(quantity)) as ArrayRef),
            ("price", Arc::new(Float64Array::from(price)) as ArrayRef),
        ],
    )
    .unwrap()
}

fn bench_single_column_profiling(c: &mut Criterion) {
    let table = order_lines(20_000);
    let profiler = ColumnProfiler::builder().seed(7).build();

    let mut group = c.benchmark_group("single_column_profiling");
    group.measurement_time(Duration::from_secs(8));

    for (name, column) in [
        ("string_low_cardinality", "status"),
        ("string_high_cardinality", "comment"),
        ("integer_with_nulls", "quantity"),
        ("float_high_cardinality", "price"),
    ] {
        group.bench_with_input(BenchmarkId::new("default_config", name), &column, |b, &column| {
            b.iter(|| {
                profiler
                    .profile_column_by_name(black_box(&table), black_box(column))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_table_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_summary");
    group.sample_size(20);

    for rows in [1_000, 10_000, 100_000] {
        let table = order_lines(rows);
        let config = BriefConfig::default().with_seed(7);
        group.bench_with_input(BenchmarkId::new("summarize", rows), &table, |b, table| {
            b.iter(|| summarize(black_box(table), &config).unwrap());
        });
    }

    group.finish();
}

fn bench_schema_annotation(c: &mut Criterion) {
    let table = order_lines(10_000);
    let ddl = render_create_table(&table);
    let annotator = SchemaAnnotator::new();

    c.bench_function("annotate_schema", |b| {
        b.iter(|| annotator.annotate(black_box(&ddl), &table, true).unwrap());
    });
}

criterion_group!(
    benches,
    bench_single_column_profiling,
    bench_table_summary,
    bench_schema_annotation
);
criterion_main!(benches);
