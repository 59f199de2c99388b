//! Performance benchmarks for the space-time reduction strategies
//!
//! Compares basis construction plus training projection (`reduce`) and
//! batch reconstruction (`expand`) across the three strategies on a
//! moderate snapshot tensor.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use podrom_decomp::{PodConfig, SpaceTimePod, SpaceTimeStrategy};
use scirs2_core::ndarray_ext::Array3;
use std::hint::black_box;

fn snapshot_tensor(nt: usize, ns: usize, npar: usize) -> Array3<f64> {
    Array3::from_shape_fn((nt, ns, npar), |(t, s, p)| {
        let mu = 1.0 + 0.2 * p as f64;
        (mu * t as f64 * 0.21).sin() * (s as f64 * 0.13).cos() + (mu * s as f64 * 0.07).sin()
    })
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("spacetime_reduce");

    for &(nt, ns, npar) in &[(40, 30, 8), (80, 50, 10)] {
        let tensor = snapshot_tensor(nt, ns, npar);
        group.throughput(Throughput::Elements((nt * ns * npar) as u64));

        for strategy in SpaceTimeStrategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), format!("{}x{}x{}", nt, ns, npar)),
                &tensor,
                |b, tensor| {
                    b.iter(|| {
                        let mut rom = SpaceTimePod::new(black_box(strategy)).with_pod_configs(
                            PodConfig::with_rank(5),
                            PodConfig::with_rank(5),
                        );
                        black_box(rom.reduce(&tensor.view()).unwrap())
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("spacetime_expand");

    let tensor = snapshot_tensor(60, 40, 8);
    for strategy in SpaceTimeStrategy::ALL {
        let mut rom = SpaceTimePod::new(strategy)
            .with_pod_configs(PodConfig::with_rank(5), PodConfig::with_rank(5));
        let coeffs = rom.reduce(&tensor.view()).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(strategy.name()),
            &(rom, coeffs),
            |b, (rom, coeffs)| b.iter(|| black_box(rom.expand(&coeffs.view()).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reduce, bench_expand);
criterion_main!(benches);
