/*
Benchmarks on the harness shapes.

Run all benchmarks -> cargo bench
Run one group -> cargo bench randint_2d
*/

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::hint::black_box;

use random_2d::{choice_2d_with, randint_2d_with, DrawStrategy, SampleOptions};

fn bench_options() -> Vec<(String, SampleOptions)> {
    let mut opts = Vec::new();
    for strategy in [DrawStrategy::Shuffle, DrawStrategy::Reservoir] {
        for parallel in [false, true] {
            let name = format!("{}-{}", strategy, if parallel { "par" } else { "seq" });
            opts.push((name, SampleOptions { strategy, parallel }));
        }
    }
    opts
}

fn bench_randint(c: &mut Criterion) {
    let mut group = c.benchmark_group("randint_2d");
    for (name, options) in bench_options() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &options, |b, opts| {
            let mut rng = Pcg64::seed_from_u64(42);
            b.iter(|| randint_2d_with(0, 1000, 2000, 300, black_box(opts), &mut rng).unwrap())
        });
    }
    group.finish();
}

fn bench_choice(c: &mut Criterion) {
    let array = Array2::from_shape_vec((2000, 300), (0..600_000i64).collect()).unwrap();
    let mut group = c.benchmark_group("choice_2d");
    for (name, options) in bench_options() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &options, |b, opts| {
            let mut rng = Pcg64::seed_from_u64(42);
            b.iter(|| choice_2d_with(array.view(), 100, None, black_box(opts), &mut rng).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_randint, bench_choice);
criterion_main!(benches);
