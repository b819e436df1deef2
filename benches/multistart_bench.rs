//! Criterion benchmarks for u-multistart.
//!
//! Uses synthetic problems (Sphere, Rastrigin) to measure sampling,
//! screening, and full TikTak runs independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_multistart::local::NelderMead;
use u_multistart::problem::MinimizationProblem;
use u_multistart::quasirandom::SobolSampler;
use u_multistart::screening::CandidateScreener;
use u_multistart::tiktak::{TikTakConfig, TikTakRunner};

// ===========================================================================
// Problems
// ===========================================================================

fn sphere(dim: usize) -> MinimizationProblem {
    MinimizationProblem::new(
        |x: &[f64]| x.iter().map(|v| v * v).sum(),
        vec![-5.0; dim],
        vec![5.0; dim],
    )
    .unwrap()
}

fn rastrigin(dim: usize) -> MinimizationProblem {
    MinimizationProblem::new(
        |x: &[f64]| {
            10.0 * x.len() as f64
                + x.iter()
                    .map(|v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos())
                    .sum::<f64>()
        },
        vec![-5.12; dim],
        vec![5.12; dim],
    )
    .unwrap()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_sobol(c: &mut Criterion) {
    let mut group = c.benchmark_group("sobol_unit_points");

    for &dim in &[2usize, 10, 50] {
        let sampler = SobolSampler::default();
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &d| {
            b.iter(|| black_box(sampler.unit_points(black_box(d), 1000)))
        });
    }
    group.finish();
}

fn bench_screening(c: &mut Criterion) {
    let mut group = c.benchmark_group("screening_rastrigin");
    group.sample_size(20);

    for &dim in &[2usize, 10] {
        let problem = rastrigin(dim);
        let points = SobolSampler::default()
            .scaled_points(&problem, 2000)
            .unwrap();
        let screener = CandidateScreener::new(0.1).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(dim),
            &(problem, points),
            |b, (p, pts)| b.iter(|| black_box(screener.screen(black_box(p), pts.clone()))),
        );
    }
    group.finish();
}

fn bench_tiktak(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiktak");
    group.sample_size(10);

    for (name, problem, n) in [
        ("sphere_d4", sphere(4), 100usize),
        ("rastrigin_d2", rastrigin(2), 200),
        ("rastrigin_d5", rastrigin(5), 500),
    ] {
        let config = TikTakConfig::new(n);
        let method = NelderMead::default();
        group.bench_with_input(
            BenchmarkId::new(name, n),
            &(problem, config),
            |b, (p, cfg)| {
                b.iter(|| {
                    let result = TikTakRunner::run(black_box(cfg), &method, black_box(p));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_sobol, bench_screening, bench_tiktak);
criterion_main!(benches);
