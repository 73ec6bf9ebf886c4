//! Benchmarks for index construction and both lookup strategies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rollsketch::prelude::*;

/// Random lowercase words of 4 to 12 characters
fn generate_words(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(4..=12);
            (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}

/// Benchmark: building an index from scratch
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [1_000, 10_000, 100_000] {
        let words = generate_words(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| {
                let index = SketchIndex::default().build(black_box(words));
                black_box(index.len());
            });
        });
    }
    group.finish();
}

/// Benchmark: exact lookup across radii
fn bench_exact_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_lookup");
    let words = generate_words(10_000, 7);

    for radius in 0..=2 {
        let index = SketchIndex::with_radius(radius).unwrap().build(&words);
        group.bench_with_input(BenchmarkId::new("radius", radius), &radius, |b, _| {
            b.iter(|| black_box(index.lookup(black_box("sketchy"))));
        });
    }
    group.finish();
}

/// Benchmark: exact lookup across query lengths
fn bench_exact_lookup_query_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_lookup_query_length");
    let index = SketchIndex::with_radius(1)
        .unwrap()
        .build(generate_words(10_000, 7));

    for query in ["abc", "abcdefgh", "abcdefghijklmnop"] {
        group.bench_with_input(BenchmarkId::from_parameter(query.len()), query, |b, q| {
            b.iter(|| black_box(index.lookup(black_box(q))));
        });
    }
    group.finish();
}

/// Benchmark: bit-run lookup across radii and run lengths
fn bench_bit_run_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_run_lookup");
    let words = generate_words(10_000, 7);

    for max_run in [2, 6] {
        let index = IndexBuilder::new()
            .edit_radius(1)
            .max_run(max_run)
            .build()
            .unwrap()
            .build(&words);
        group.bench_with_input(BenchmarkId::new("k1_max_run", max_run), &max_run, |b, _| {
            b.iter(|| black_box(index.lookup_bit_run(black_box("sketchy"))));
        });
    }

    let index = IndexBuilder::new()
        .edit_radius(2)
        .max_run(2)
        .build()
        .unwrap()
        .build(&words);
    group.sample_size(10);
    group.bench_function("k2_max_run_2", |b| {
        b.iter(|| black_box(index.lookup_bit_run(black_box("sketchy"))));
    });
    group.finish();
}

/// Benchmark: exact versus verified lookup
fn bench_verified_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("verified_lookup");
    let index = SketchIndex::with_radius(1)
        .unwrap()
        .build(generate_words(10_000, 7));

    group.bench_function("exact", |b| {
        b.iter(|| black_box(index.lookup(black_box("sketchy"))));
    });
    group.bench_function("verified", |b| {
        b.iter(|| black_box(index.lookup_verified(black_box("sketchy"))));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_exact_lookup,
    bench_exact_lookup_query_length,
    bench_bit_run_lookup,
    bench_verified_lookup
);
criterion_main!(benches);
