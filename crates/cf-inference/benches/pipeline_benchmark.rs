use cf_inference::{AdjustmentSet, SimulationConfig, Variable, ols_fit, run_experiment, simulate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for &n in &[1_000usize, 10_000, 100_000] {
        let cfg = SimulationConfig { n_rows: n, ..SimulationConfig::default() };
        group.bench_with_input(BenchmarkId::new("simulate", n), &cfg, |b, cfg| {
            b.iter(|| simulate(black_box(cfg)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("run_experiment", n), &cfg, |b, cfg| {
            b.iter(|| run_experiment(black_box(cfg)).unwrap())
        });
    }
    group.finish();
}

fn bench_ols(c: &mut Criterion) {
    let table = simulate(&SimulationConfig::default()).unwrap();
    let mut group = c.benchmark_group("ols_fit");
    for set in AdjustmentSet::ALL {
        group.bench_function(set.formula(), |b| {
            b.iter(|| ols_fit(black_box(&table), Variable::Outcome, set.predictors()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_ols);
criterion_main!(benches);
