use aberration::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_distr::Normal;
use std::f64::consts::PI;

/// Generate a weekly seasonal series
fn generate_seasonal_data(size: usize, seed: u64) -> TimeSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 5.0).unwrap();
    let values = (1..=size)
        .map(|t| 100.0 + 30.0 * (2.0 * PI * t as f64 / 52.0).sin() + noise.sample(&mut rng))
        .collect();
    TimeSeries::from_values(values).unwrap()
}

fn bench_control_charts(c: &mut Criterion) {
    let mut group = c.benchmark_group("ControlCharts");
    let cusum = ModifiedCusum::new(CusumParameters::default()).unwrap();
    let ewma = EwmaDetector::new(EwmaParameters::default()).unwrap();

    for size in [104, 520, 5200] {
        let series = generate_seasonal_data(size, 42);

        group.bench_with_input(BenchmarkId::new("cusum", size), &series, |b, series| {
            b.iter(|| cusum.detect(black_box(series)))
        });
        group.bench_with_input(BenchmarkId::new("ewma", size), &series, |b, series| {
            b.iter(|| ewma.detect(black_box(series)))
        });
    }

    group.finish();
}

fn bench_serfling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Serfling");
    let single = AdjustedSerfling::new(SerflingParameters::default()).unwrap();
    let double = AdjustedSerfling::new(SerflingParameters {
        cycles: vec![52, 26],
        ..Default::default()
    })
    .unwrap();

    for size in [156, 520] {
        let series = generate_seasonal_data(size, 7);

        group.bench_with_input(BenchmarkId::new("annual", size), &series, |b, series| {
            b.iter(|| single.detect(black_box(series)))
        });
        group.bench_with_input(BenchmarkId::new("annual+semiannual", size), &series, |b, series| {
            b.iter(|| double.detect(black_box(series)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_control_charts, bench_serfling);
criterion_main!(benches);
