//! IntSet construction and set-algebra benchmark.
//!
//! Compares incremental construction from the default capacity against
//! construction from a capacity of one (worst case for regrowth), and
//! measures the quadratic set-algebra operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use intset::IntSet;
use std::hint::black_box;

const SIZES: [i32; 3] = [10, 100, 1000];

fn build(size: i32, initial_capacity: usize) -> IntSet {
    let mut set = IntSet::with_capacity(initial_capacity);
    for value in 0..size {
        set.add(value);
    }
    set
}

fn benchmark_add(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("int_set_add");

    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("default_capacity", size), &size, |bencher, &size| {
            bencher.iter(|| black_box(build(black_box(size), 0)));
        });
        group.bench_with_input(BenchmarkId::new("capacity_one", size), &size, |bencher, &size| {
            bencher.iter(|| black_box(build(black_box(size), 1)));
        });
    }

    group.finish();
}

fn benchmark_algebra(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("int_set_algebra");

    for size in SIZES {
        let left = build(size, 0);
        let right: IntSet = (size / 2..size + size / 2).collect();

        group.bench_with_input(BenchmarkId::new("union_with", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.union_with(black_box(&right))));
        });
        group.bench_with_input(BenchmarkId::new("intersect", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.intersect(black_box(&right))));
        });
        group.bench_with_input(BenchmarkId::new("subtract", size), &size, |bencher, _| {
            bencher.iter(|| black_box(left.subtract(black_box(&right))));
        });
        group.bench_with_input(BenchmarkId::new("equality", size), &size, |bencher, _| {
            bencher.iter(|| black_box(black_box(&left) == black_box(&right)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_add, benchmark_algebra);
criterion_main!(benches);
