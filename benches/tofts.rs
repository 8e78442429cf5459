use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tracersol::prelude::*;

/// Six minutes of 1 s sampling with a bi-exponential arterial curve
fn uniform_input() -> ArterialInput {
    let times: Vec<f64> = (0..360).map(|i| i as f64).collect();
    ArterialInput::new(times.clone(), arterial_curve(&times)).unwrap()
}

/// Dense sampling over the bolus, sparse afterwards
fn irregular_input() -> ArterialInput {
    let mut times: Vec<f64> = (0..120).map(|i| i as f64 * 0.5).collect();
    times.extend((0..60).map(|i| 60.0 + i as f64 * 5.0));
    ArterialInput::new(times.clone(), arterial_curve(&times)).unwrap()
}

fn arterial_curve(times: &[f64]) -> Vec<f64> {
    times
        .iter()
        .map(|&t| {
            let s = (t - 10.0).max(0.0);
            (1.0 - (-s / 4.0).exp()) * (4.0 * (-s / 30.0).exp() + 2.0 * (-s / 400.0).exp())
        })
        .collect()
}

fn bench_single_voxel(c: &mut Criterion) {
    let mut group = c.benchmark_group("extended_tofts_single");
    let params = ExtendedToftsParams::new(0.6, 0.2, 0.05);

    for (label, input) in [("uniform", uniform_input()), ("irregular", irregular_input())] {
        for method in [
            DiscretizationMethod::Convolution,
            DiscretizationMethod::Exponential,
        ] {
            let options = SimulationOptions::default().with_method(method);
            group.bench_function(format!("{}_{}", label, method), |b| {
                b.iter(|| {
                    let ct = black_box(&input).extended_tofts(black_box(&params), &options);
                    black_box(ct)
                });
            });
        }
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("tofts_batch");
    let input = uniform_input();
    let options = SimulationOptions::default();

    for size in [100, 1000, 10000] {
        let params: Vec<ToftsParams> = (0..size)
            .map(|i| ToftsParams::new(0.05 + (i % 17) as f64 * 0.05, 0.1 + (i % 7) as f64 * 0.1))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let result = simulate_tofts_batch(black_box(&input), black_box(&params), &options);
                black_box(result)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_voxel, bench_batch);
criterion_main!(benches);
