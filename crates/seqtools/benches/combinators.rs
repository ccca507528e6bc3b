//! Benchmarks for the stateful combinators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seqtools::prelude::*;
use seqtools::{combinations, count, permutations, product, product_repeat, tee};

fn benchmark_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("product");

    for pool_size in [4, 8, 16].iter() {
        group.bench_with_input(
            BenchmarkId::new("three_pools", pool_size),
            pool_size,
            |b, &pool_size| {
                let pool: Vec<u32> = (0..pool_size).collect();
                b.iter(|| {
                    product(vec![pool.clone(), pool.clone(), pool.clone()]).count()
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("repeat_4", pool_size),
            pool_size,
            |b, &pool_size| {
                let pool: Vec<u32> = (0..pool_size).collect();
                b.iter(|| product_repeat(pool.clone(), 4).count());
            },
        );
    }

    group.finish();
}

fn benchmark_arrangements(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrangements");

    for n in [4, 6, 8].iter() {
        group.bench_with_input(BenchmarkId::new("permutations", n), n, |b, &n| {
            let pool: Vec<u32> = (0..n).collect();
            b.iter(|| permutations(pool.clone(), None).count());
        });

        group.bench_with_input(BenchmarkId::new("combinations_3", n), n, |b, &n| {
            let pool: Vec<u32> = (0..n).collect();
            b.iter(|| combinations(pool.clone(), 3).count());
        });
    }

    group.finish();
}

fn benchmark_group_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by");

    for run_length in [1, 10, 100].iter() {
        group.bench_with_input(
            BenchmarkId::new("runs", run_length),
            run_length,
            |b, &run_length| {
                b.iter(|| {
                    count(0u64, 1)
                        .limit(10_000)
                        .group_by(|x| *x / run_length)
                        .count()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_tee(c: &mut Criterion) {
    let mut group = c.benchmark_group("tee");

    let data: Vec<u64> = (0..10_000).collect();

    for branches in [2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("lockstep", branches),
            branches,
            |b, &branches| {
                b.iter(|| {
                    let mut readers = tee(data.iter().copied(), branches);
                    let mut total = 0u64;
                    'outer: loop {
                        for reader in readers.iter_mut() {
                            match reader.next() {
                                Some(value) => total += value,
                                None => break 'outer,
                            }
                        }
                    }
                    black_box(total)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("sequential", branches),
            branches,
            |b, &branches| {
                b.iter(|| {
                    tee(data.iter().copied(), branches)
                        .into_iter()
                        .map(|reader| reader.sum::<u64>())
                        .sum::<u64>()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_product,
    benchmark_arrangements,
    benchmark_group_by,
    benchmark_tee
);
criterion_main!(benches);
