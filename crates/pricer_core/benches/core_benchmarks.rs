//! Criterion benchmarks for pricer_core numerics.
//!
//! Measures bounded Newton-Raphson solves and fixed-decimal rounding, the
//! two primitives called on every pricing and implied volatility request.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::math::rounding::{round_to, GREEK_DECIMALS};
use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};

/// Benchmark Newton-Raphson on cube roots of increasing magnitude.
fn bench_newton_raphson(c: &mut Criterion) {
    let mut group = c.benchmark_group("newton_raphson");
    let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-10, 100));

    for target in [2.0_f64, 1_000.0, 1_000_000.0] {
        group.bench_with_input(BenchmarkId::new("cube_root", target as u64), &target, |b, &t| {
            b.iter(|| {
                solver.find_root_bounded(
                    |x: f64| (x * x * x - black_box(t), 3.0 * x * x),
                    1.0,
                    1e-6,
                    1e6,
                )
            });
        });
    }

    group.finish();
}

/// Benchmark rounding a batch of Greek-sized values.
fn bench_rounding(c: &mut Criterion) {
    let values: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.7311).sin()).collect();

    c.bench_function("round_to_1000", |b| {
        b.iter(|| {
            values
                .iter()
                .map(|&v| round_to(black_box(v), GREEK_DECIMALS))
                .sum::<f64>()
        });
    });
}

criterion_group!(benches, bench_newton_raphson, bench_rounding);
criterion_main!(benches);
