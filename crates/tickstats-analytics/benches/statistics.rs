//! Benchmarks for the Monte Carlo simulator and the VaR table.
//!
//! Run with: cargo bench -p tickstats-analytics

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

use tickstats_analytics::montecarlo::{MonteCarloSimulator, ReturnDistribution};
use tickstats_analytics::risk::{var_cvar_table, ConfidenceLevel};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn synthetic_returns(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            0.0003 + 0.011 * (x * 0.618).sin() + 0.006 * (x * 2.399).cos()
        })
        .collect()
}

fn simulator(simulations: usize, forecast_period: usize) -> MonteCarloSimulator {
    let distribution = ReturnDistribution::from_returns(&synthetic_returns(500)).unwrap();
    MonteCarloSimulator::new(distribution, 100.0, simulations, forecast_period).unwrap()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_simulate_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("montecarlo_sequential");
    group.sample_size(30);

    for simulations in [150, 1_000, 5_000].iter() {
        let sim = simulator(*simulations, 100);
        group.throughput(Throughput::Elements((*simulations * 100) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(simulations), &sim, |b, sim| {
            b.iter(|| sim.simulate(&mut StdRng::seed_from_u64(black_box(42))))
        });
    }
    group.finish();
}

fn bench_simulate_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("montecarlo_comparison");
    group.sample_size(30);

    let sim = simulator(5_000, 250);
    group.throughput(Throughput::Elements(5_000 * 250));

    group.bench_function("sequential", |b| {
        b.iter(|| sim.simulate(&mut StdRng::seed_from_u64(black_box(7))))
    });
    group.bench_function("parallel", |b| b.iter(|| sim.simulate_parallel(black_box(7))));
    group.finish();
}

fn bench_var_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("var_cvar_table");

    for size in [250, 2_500, 25_000].iter() {
        let returns = synthetic_returns(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &returns, |b, returns| {
            b.iter(|| var_cvar_table(black_box(returns), &ConfidenceLevel::STANDARD))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_simulate_sequential,
    bench_simulate_comparison,
    bench_var_table
);
criterion_main!(benches);
