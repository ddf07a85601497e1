//! Coverage of prediction intervals on simulated linear data

use aberration_regression::{OlsFit, RowMask};
use approx::assert_relative_eq;
use nalgebra::DMatrix;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn design(ts: &[f64]) -> DMatrix<f64> {
    DMatrix::from_fn(ts.len(), 2, |i, j| if j == 0 { 1.0 } else { ts[i] })
}

#[test]
fn test_prediction_interval_coverage_is_near_nominal() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let noise = Normal::new(0.0, 2.0).unwrap();

    let train_t: Vec<f64> = (1..=200).map(|t| t as f64).collect();
    let train_y: Vec<f64> = train_t
        .iter()
        .map(|t| 5.0 + 0.3 * t + noise.sample(&mut rng))
        .collect();
    let fit = OlsFit::fit(&design(&train_t), &train_y, &RowMask::all(200)).unwrap();

    // Fresh draws over the training range, five per time point
    let test_t: Vec<f64> = (0..1000).map(|i| (i % 200 + 1) as f64).collect();
    let intervals = fit.predict(&design(&test_t), 0.95).unwrap();
    let covered = test_t
        .iter()
        .zip(&intervals)
        .filter(|(t, pi)| {
            let y = 5.0 + 0.3 * **t + noise.sample(&mut rng);
            pi.lower <= y && y <= pi.upper
        })
        .count();

    let coverage = covered as f64 / test_t.len() as f64;
    assert!(
        (0.92..=0.98).contains(&coverage),
        "coverage {coverage:.3} far from 0.95"
    );
}

#[test]
fn test_fit_is_serializable_without_loss() {
    let t: Vec<f64> = (1..=12).map(|t| t as f64).collect();
    let y: Vec<f64> = t.iter().map(|t| (t * 0.7).sin() * 3.0 + t).collect();
    let fit = OlsFit::fit(&design(&t), &y, &RowMask::all(12)).unwrap();

    let json = serde_json::to_string(&fit).unwrap();
    let restored: OlsFit = serde_json::from_str(&json).unwrap();

    let new_rows = design(&[13.0, 14.0]);
    let original = fit.predict(&new_rows, 0.95).unwrap();
    let reloaded = restored.predict(&new_rows, 0.95).unwrap();
    for (a, b) in original.iter().zip(&reloaded) {
        assert_relative_eq!(a.fit, b.fit, max_relative = 1e-12);
        assert_relative_eq!(a.upper, b.upper, max_relative = 1e-12);
    }
}
