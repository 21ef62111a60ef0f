//! Criterion benchmarks for episodes, analysis and sweeps.
//!
//! Run with:
//!   cargo bench
//!   cargo bench --no-default-features   (sequential sweep)
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tgc_dynamics::{analyze, manifold, omega_sweep, run_episode, EpisodeConfig, IntegrationScheme};

/// Full episode with varying lengths.
fn bench_episode_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("episode_steps");

    for n_steps in [100usize, 400, 1600].iter() {
        group.throughput(Throughput::Elements(*n_steps as u64));

        for (label, scheme) in [
            ("euler_maruyama", IntegrationScheme::EulerMaruyama),
            ("adiabatic", IntegrationScheme::Adiabatic),
        ] {
            group.bench_with_input(BenchmarkId::new(label, n_steps), n_steps, |b, &n| {
                let config = EpisodeConfig::default()
                    .with_omega(3.0)
                    .with_steps(n)
                    .with_integration(scheme);
                b.iter(|| run_episode(black_box(config.clone())))
            });
        }
    }

    group.finish();
}

/// Post-hoc analysis of a completed 400-step trajectory.
fn bench_analyze(c: &mut Criterion) {
    let Ok(trajectory) = run_episode(EpisodeConfig::default().with_omega(3.0)) else {
        return;
    };
    c.bench_function("analyze_400", |b| b.iter(|| analyze(black_box(&trajectory))));
}

/// Cardano roots across the bistable region.
fn bench_equilibria(c: &mut Criterion) {
    c.bench_function("equilibria", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..100 {
                let e = -2.0 + i as f64 * 0.04;
                acc += manifold::equilibria(black_box(3.0), black_box(e)).len() as f64;
            }
            acc
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    let base = EpisodeConfig::default().with_steps(400);
    let omegas: Vec<f64> = (0..16).map(|i| i as f64 * 0.25).collect();

    let mut group = c.benchmark_group("omega_sweep");
    group.sample_size(20);
    group.bench_function("16_points", |b| b.iter(|| omega_sweep(black_box(&base), &omegas)));
    group.finish();
}

criterion_group!(benches, bench_episode_steps, bench_analyze, bench_equilibria, bench_sweep);
criterion_main!(benches);
