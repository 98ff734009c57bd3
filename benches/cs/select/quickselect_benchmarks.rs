use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quickselect::select::{
    general_quick_select, generate_xs, quick_select1_with, OneRandomPivot, RandomPivots,
    TwoRandomPivots,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_quickselect(c: &mut Criterion) {
    let mut group = c.benchmark_group("quickselect");
    let mut rng = StdRng::seed_from_u64(42);

    for &n in &[100usize, 1_000, 10_000] {
        let xs = generate_xs(n, n as i64, 0, &mut rng).unwrap();
        let k = n / 10 + 1;

        group.bench_with_input(BenchmarkId::new("explicit_1_pivot", n), &xs, |b, xs| {
            b.iter(|| quick_select1_with(black_box(xs), k, &mut rng).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("general_1_pivot", n), &xs, |b, xs| {
            b.iter(|| general_quick_select(black_box(xs), k, &OneRandomPivot, &mut rng).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("general_2_pivot", n), &xs, |b, xs| {
            b.iter(|| general_quick_select(black_box(xs), k, &TwoRandomPivots, &mut rng).unwrap())
        });

        let four = RandomPivots::new(4).unwrap();
        group.bench_with_input(BenchmarkId::new("general_4_pivot", n), &xs, |b, xs| {
            b.iter(|| general_quick_select(black_box(xs), k, &four, &mut rng).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_quickselect);
criterion_main!(benches);
