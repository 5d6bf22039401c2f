use criterion::{criterion_group, criterion_main, Criterion};
use large_map::{CapacityCalculator, LevelCapacityCalculator};
use std::hint::black_box;

fn capacity_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("capacity calculate");

    for capacity in [1_000_i64, 10_000_000, 1 << 50, i64::MAX] {
        group.bench_function(format!("{capacity}"), |b| {
            b.iter(|| {
                LevelCapacityCalculator
                    .calculate(black_box(capacity))
                    .expect("should calculate")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, capacity_calculate);
criterion_main!(benches);
