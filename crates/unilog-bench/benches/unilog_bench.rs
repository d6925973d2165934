//! Benchmarks for unilog operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use unilog_bench::{gradient_image, ramp_values, scattered_rgb};
use unilog_color::LogSpace;
use unilog_compare::{compare, heatmap, CompareOptions};
use unilog_lut::{concatenate, evaluate, generate, resize, GenerateOptions};
use unilog_transfer::Curve;

/// Log curve encode/decode over a ramp.
fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");
    let values = ramp_values(10_000);
    group.throughput(Throughput::Elements(values.len() as u64));

    for curve in [Curve::SLog3, Curve::LogC4, Curve::FLog2, Curve::Log3G10] {
        let name = format!("{curve:?}");
        group.bench_with_input(BenchmarkId::new("decode", &name), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| curve.decode(black_box(x))).collect::<Vec<_>>())
        });
        group.bench_with_input(BenchmarkId::new("encode", &name), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| curve.encode(black_box(x))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Trilinear lookups at scattered points.
fn bench_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler");
    let points = scattered_rgb(10_000);
    group.throughput(Throughput::Elements(points.len() as u64));

    for size in [17, 33, 65] {
        let Ok(lut) = generate(LogSpace::SLog3, LogSpace::LogC4, size, &GenerateOptions::default())
        else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("evaluate", size), &points, |b, pts| {
            b.iter(|| pts.iter().map(|&p| evaluate(&lut, black_box(p))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Table construction: bridge generation, chaining and resampling.
fn bench_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("tables");
    group.sample_size(10);
    let opts = GenerateOptions::default();

    for size in [17, 33] {
        group.throughput(Throughput::Elements((size * size * size) as u64));
        group.bench_with_input(BenchmarkId::new("generate", size), &size, |b, &n| {
            b.iter(|| generate(black_box(LogSpace::VLog), LogSpace::CLog3, n, &opts))
        });

        let (Ok(first), Ok(second)) = (
            generate(LogSpace::NLog, LogSpace::LogC4, size, &opts),
            generate(LogSpace::LogC4, LogSpace::DaVinciIntermediate, size, &opts),
        ) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("concatenate", size), &size, |b, _| {
            b.iter(|| concatenate(black_box(&first), &second, None))
        });
        group.bench_with_input(BenchmarkId::new("resize_to_65", size), &size, |b, _| {
            b.iter(|| resize(black_box(&first), 65))
        });
    }

    group.finish();
}

/// Image comparison and heatmap rendering.
fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    group.sample_size(20);
    let opts = CompareOptions::default();

    for side in [256u32, 1024] {
        let a = gradient_image(side, side, 0);
        let b = gradient_image(side, side, 300);
        group.throughput(Throughput::Elements(u64::from(side) * u64::from(side)));

        group.bench_with_input(BenchmarkId::new("compare", side), &side, |bench, _| {
            bench.iter(|| compare(black_box(&a), &b, &opts))
        });
        group.bench_with_input(BenchmarkId::new("heatmap", side), &side, |bench, _| {
            bench.iter(|| heatmap(black_box(&a), &b, 4.0))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transfer, bench_sampler, bench_tables, bench_compare);
criterion_main!(benches);
