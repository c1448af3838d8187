//! Criterion benchmarks for whole runs through the engine.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use grayscott_bench::{reference_profile, stress_profile};
use grayscott_engine::{Simulation, VecSink};
use grayscott_kernels::{Integrator, Stencil};

/// Benchmark: 10 timesteps of the reference profile per scheme.
fn bench_reference_10_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_10_steps");
    group.sample_size(20);
    for stencil in [Stencil::FivePoint, Stencil::NinePoint] {
        for integrator in [Integrator::Euler, Integrator::Rk4] {
            let mut config = reference_profile(42, 11);
            config.stencil = stencil;
            config.integrator = integrator;
            group.bench_function(format!("{stencil}/{integrator}"), |b| {
                b.iter(|| {
                    let mut sim = Simulation::new(config.clone()).unwrap();
                    let summary = sim.run(VecSink::new(), ()).unwrap();
                    black_box(summary);
                });
            });
        }
    }
    group.finish();
}

/// Benchmark: 3 timesteps on a 1024x1024 grid, initialization included.
fn bench_stress_3_steps(c: &mut Criterion) {
    let config = stress_profile(42, 4);
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("1024_3_steps", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(config.clone()).unwrap();
            black_box(sim.run(VecSink::new(), ()).unwrap());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_reference_10_steps, bench_stress_3_steps);
criterion_main!(benches);
