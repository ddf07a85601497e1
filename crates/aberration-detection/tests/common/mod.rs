//! Seeded synthetic surveillance series
#![allow(dead_code)]

use aberration_core::TimeSeries;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

pub fn seasonal_mean(t: usize) -> f64 {
    let t = t as f64;
    80.0 + 0.05 * t + 25.0 * (2.0 * PI * t / 52.0).sin()
}

/// Weekly series starting at week 1 with Gaussian noise and optional outbreak bumps
pub fn weekly_series(weeks: usize, noise_sd: f64, seed: u64, bumps: &[(usize, f64)]) -> TimeSeries {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, noise_sd).unwrap();
    let mut values: Vec<f64> = (1..=weeks)
        .map(|t| seasonal_mean(t) + noise.sample(&mut rng))
        .collect();
    for &(week, size) in bumps {
        values[week - 1] += size;
    }
    TimeSeries::from_values(values).unwrap()
}
