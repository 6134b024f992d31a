use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mailmetrics::funnel::{calculate_all, Assumptions};
use mailmetrics::sample_size::{
    calculate_all_results, generate_mde_sensitivity_table, SampleSizeInputs,
};

fn bench_roas_calculate_all(c: &mut Criterion) {
    let assumptions = Assumptions::default();

    let mut group = c.benchmark_group("roas");
    group.bench_function("calculate_all", |b| {
        b.iter(|| calculate_all(black_box(&assumptions)))
    });

    // Simulate a slider being dragged: recompute across many piece counts
    for batch_size in [100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("recompute_batch", batch_size),
            batch_size,
            |b, &size| {
                b.iter(|| {
                    for i in 0..size {
                        let assumptions = Assumptions {
                            mail_pieces: 1_000.0 + i as f64 * 500.0,
                            ..Assumptions::default()
                        };
                        black_box(calculate_all(&assumptions));
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_sample_size(c: &mut Criterion) {
    let inputs = SampleSizeInputs::default();

    let mut group = c.benchmark_group("sample_size");
    group.bench_function("calculate_all_results", |b| {
        b.iter(|| calculate_all_results(black_box(&inputs)))
    });
    group.bench_function("mde_sensitivity_table", |b| {
        b.iter(|| generate_mde_sensitivity_table(black_box(&inputs), black_box(0.20)))
    });
    group.finish();
}

criterion_group!(benches, bench_roas_calculate_all, bench_sample_size);
criterion_main!(benches);
