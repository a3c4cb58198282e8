//! Benchmarks for timetable layout performance.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::cast_possible_truncation,
    clippy::indexing_slicing
)]

use coursegrid::render::{render, render_json};
use coursegrid::{timecode, CourseRecord, RenderConfig, SelectionMap};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const PERIODS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];

/// `count` synthetic course rows spread over the week, with overlaps.
fn synthetic_rows(count: usize) -> Vec<CourseRecord> {
    (0..count)
        .map(|i| {
            let day = i % 5 + 1;
            let start = (i * 7) % (PERIODS.len() - 2);
            let len = i % 3 + 1;
            let letters: String = PERIODS[start..start + len].iter().collect();
            CourseRecord::new()
                .with("課程名稱", format!("Course {i}"))
                .with("課程編號", format!("C{i:04}"))
                .with("上課時間", format!("{day}{letters}"))
                .with("選別", if i % 4 == 0 { "必修" } else { "選修" })
                .with("學分數", 3)
                .with("任課教師", "Teacher")
        })
        .collect()
}

/// Benchmark time-code decoding
fn bench_timecode(c: &mut Criterion) {
    c.bench_function("parse_timecode", |b| {
        b.iter(|| timecode::parse(black_box("1ABC,2DE,3FGH,4IJ,5A")))
    });
}

/// Benchmark a typical semester load
fn bench_render_semester(c: &mut Criterion) {
    let rows = synthetic_rows(40);
    let selection = SelectionMap::new();
    let config = RenderConfig::default();

    c.bench_function("render_semester", |b| {
        b.iter(|| render(black_box(&rows), &selection, &config))
    });
}

/// Compare render performance as the course list grows (more overlaps)
fn bench_row_counts(c: &mut Criterion) {
    let config = RenderConfig::default();
    let selection = SelectionMap::new();

    let mut group = c.benchmark_group("row_count_comparison");
    for count in [10usize, 100, 1000] {
        let rows = synthetic_rows(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("render", count), &rows, |b, rows| {
            b.iter(|| render(black_box(rows), &selection, &config))
        });
    }
    group.finish();
}

/// Benchmark the JSON boundary end to end
fn bench_render_json(c: &mut Criterion) {
    let rows = serde_json::to_string(&synthetic_rows(100)).expect("Failed to serialize rows");
    let config = RenderConfig::default();

    c.bench_function("render_json_100", |b| {
        b.iter(|| render_json(black_box(&rows), None, None, &config).expect("Failed to render"))
    });
}

criterion_group!(
    benches,
    bench_timecode,
    bench_render_semester,
    bench_row_counts,
    bench_render_json
);
criterion_main!(benches);
