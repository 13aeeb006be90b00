use criterion::{criterion_group, criterion_main, Criterion};
use run_tracker::models::{Coordinate, Path, RunStats};
use run_tracker::services::{finalize_run, path_length_meters};
use std::hint::black_box;

/// A 10 km loop sampled once a second, split into `laps` polylines.
fn synthetic_path(points: usize, laps: usize) -> Path {
    let per_lap = points / laps;
    (0..laps)
        .map(|lap| {
            (0..per_lap)
                .map(|i| {
                    let t = (lap * per_lap + i) as f64 / points as f64 * std::f64::consts::TAU;
                    Coordinate::new(37.40 + 0.014 * t.sin(), -122.10 + 0.018 * t.cos())
                })
                .collect()
        })
        .collect()
}

fn benchmark_path_length(c: &mut Criterion) {
    let one_hour = synthetic_path(3_600, 1);
    let with_pauses = synthetic_path(3_600, 12);

    let mut group = c.benchmark_group("path_length");

    group.bench_function("one_hour_single_polyline", |b| {
        b.iter(|| path_length_meters(black_box(&one_hour)))
    });

    group.bench_function("one_hour_twelve_polylines", |b| {
        b.iter(|| path_length_meters(black_box(&with_pauses)))
    });

    group.finish();
}

fn benchmark_stats(c: &mut Criterion) {
    let path = synthetic_path(600, 2);
    let runs: Vec<_> = (0..1_000u64)
        .map(|i| {
            finalize_run(&path, 600_000 + i * 1_000, 80.0, None, (i as i64) * 86_400_000)
                .into_run(i + 1)
        })
        .collect();

    c.bench_function("stats_1000_runs", |b| {
        b.iter(|| RunStats::from_runs(black_box(&runs)))
    });
}

criterion_group!(benches, benchmark_path_length, benchmark_stats);
criterion_main!(benches);
