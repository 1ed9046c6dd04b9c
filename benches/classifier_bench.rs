//! Throughput of growth classification and instrumentation parsing.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dovmap::{classify, parse};
use std::hint::black_box;

fn polynomial(degree: u32, len: u64) -> Vec<u64> {
    (0..len).map(|x| x.pow(degree)).collect()
}

fn exponential(len: u32) -> Vec<u64> {
    (0..len).map(|x| 2u64.pow(x)).collect()
}

/// Linear growth with alternating dips, forcing the mean-based test.
fn noisy_linear(len: u64) -> Vec<u64> {
    (0..len)
        .map(|x| 100 + 5 * x + if x % 2 == 0 { 0 } else { 7 })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for len in [8u64, 32, 60] {
        let linear = polynomial(1, len);
        group.bench_with_input(BenchmarkId::new("linear", len), &linear, |b, steps| {
            b.iter(|| classify(black_box(steps)))
        });

        let quintic = polynomial(5, len.min(40));
        group.bench_with_input(BenchmarkId::new("quintic", len), &quintic, |b, steps| {
            b.iter(|| classify(black_box(steps)))
        });

        let exp = exponential(len as u32);
        group.bench_with_input(BenchmarkId::new("exponential", len), &exp, |b, steps| {
            b.iter(|| classify(black_box(steps)))
        });

        let noisy = noisy_linear(len);
        group.bench_with_input(BenchmarkId::new("noisy", len), &noisy, |b, steps| {
            b.iter(|| classify(black_box(steps)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let text = "MATCH: 1 (FAILED: 0)\n\
                CHAR: 1200 (FAILED: 31)\n\
                PRED: 400 (FAILED: 2)\n\
                MEMO: 35 (FAILED: 12)\n\
                STATE: 88 (FAILED: 0)\n\
                NUMBER OF TRANSITIONS ELIMINATED FROM FLATTENING: 3\n\
                NUMBER OF STATES MEMOISED: 23\n\
                TOTAL THREADS IN POOL: 5\n";
    c.bench_function("parse_instrumentation", |b| b.iter(|| parse(black_box(text))));
}

criterion_group!(benches, bench_classify, bench_parse);
criterion_main!(benches);
