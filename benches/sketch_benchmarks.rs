//! Micro-benchmarks for sketching and neighborhood generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rollsketch::prelude::*;
use rollsketch::variants::for_each_bit_run_variant;

fn bench_sketch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sketch");
    let sketcher = Sketcher::default();

    for len in [4, 16, 64, 256] {
        let word: String = "abcdefghijklmnopqrstuvwxyz".chars().cycle().take(len).collect();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &word, |b, w| {
            b.iter(|| black_box(sketcher.sketch(black_box(w))));
        });
    }
    group.finish();
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    let sketcher = Sketcher::default();

    group.bench_function("single_char", |b| {
        let base = sketcher.sketch("rolling");
        b.iter(|| black_box(sketcher.append(black_box(base), 7, black_box('s'))));
    });

    // Keystroke-by-keystroke versus re-sketching each prefix
    let word = "incrementally";
    group.bench_function("rolling_prefixes", |b| {
        b.iter(|| {
            let mut rolling = sketcher.rolling();
            for ch in black_box(word).chars() {
                rolling.push(ch);
                black_box(rolling.sketch());
            }
        });
    });
    group.bench_function("rescan_prefixes", |b| {
        b.iter(|| {
            for end in 1..=word.len() {
                black_box(sketcher.sketch(black_box(&word[..end])));
            }
        });
    });
    group.finish();
}

fn bench_edits_within(c: &mut Criterion) {
    let mut group = c.benchmark_group("edits_within");
    let alphabet = Alphabet::default();

    for k in 1..=2 {
        group.bench_with_input(BenchmarkId::new("hello", k), &k, |b, &k| {
            b.iter(|| black_box(edits_within(black_box("hello"), k, &alphabet).len()));
        });
    }
    group.finish();
}

fn bench_bit_run_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_run_variants");
    let origin = sketch("hello");

    for max_run in [1, 6, 16] {
        group.bench_with_input(
            BenchmarkId::new("k1_stream", max_run),
            &max_run,
            |b, &max_run| {
                b.iter(|| {
                    let mut count = 0u64;
                    for_each_bit_run_variant(black_box(origin), 1, max_run, |v| {
                        count += 1;
                        black_box(v);
                    });
                    count
                });
            },
        );
    }

    group.bench_function("k1_collect", |b| {
        b.iter(|| black_box(bit_run_variants(black_box(origin), 1, 6).len()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_sketch,
    bench_append,
    bench_edits_within,
    bench_bit_run_variants
);
criterion_main!(benches);
