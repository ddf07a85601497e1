//! Recursion kernels shared by the detectors
//!
//! The kernels only know about slices and per-index baselines; windowing,
//! thresholds and warnings are handled by the detectors themselves.

use aberration_core::Baseline;

/// Kernel for the one-sided cumulative sum
///
/// `C_i = max(0, X_i - μ_i - k·σ_i + C_{i-1})` where the state before the
/// first index with a baseline is zero.
#[derive(Clone, Copy, Debug)]
pub struct CusumKernel {
    k: f64,
}

impl CusumKernel {
    pub fn new(k: f64) -> Self {
        Self { k }
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    /// Accumulate over every index that has a baseline
    pub fn accumulate(&self, values: &[f64], baselines: &[Option<Baseline>]) -> Vec<Option<f64>> {
        let mut state = 0.0;
        values
            .iter()
            .zip(baselines)
            .map(|(&x, baseline)| {
                baseline.map(|b| {
                    state = (x - b.mean - self.k * b.sd + state).max(0.0);
                    state
                })
            })
            .collect()
    }

    /// Sum of the last `terms` values, defined once `terms` consecutive values exist
    pub fn trailing_sum(statistic: &[Option<f64>], terms: usize) -> Vec<Option<f64>> {
        (0..statistic.len())
            .map(|i| {
                let start = (i + 1).checked_sub(terms)?;
                statistic[start..=i]
                    .iter()
                    .try_fold(0.0, |acc, v| v.map(|v| acc + v))
            })
            .collect()
    }
}

/// Kernel for the exponentially weighted moving average
#[derive(Clone, Copy, Debug)]
pub struct EwmaKernel {
    lambda: f64,
}

impl EwmaKernel {
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// `Z_0 = X_0`, `Z_i = λ·X_i + (1 - λ)·Z_{i-1}` over the whole series
    pub fn smooth(&self, values: &[f64]) -> Vec<f64> {
        let mut smoothed = Vec::with_capacity(values.len());
        let one_minus_lambda = 1.0 - self.lambda;
        let mut iter = values.iter();
        if let Some(&first) = iter.next() {
            let mut current = first;
            smoothed.push(current);
            for &value in iter {
                current = self.lambda * value + one_minus_lambda * current;
                smoothed.push(current);
            }
        }
        smoothed
    }

    /// Asymptotic EWMA standard-deviation factor `sqrt(λ / (2 - λ))`
    pub fn limit_factor(&self) -> f64 {
        (self.lambda / (2.0 - self.lambda)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn b(mean: f64, sd: f64) -> Option<Baseline> {
        Some(Baseline { mean, sd })
    }

    #[test]
    fn test_accumulate_floor_and_carry() {
        let kernel = CusumKernel::new(1.0);
        let values = [0.0, 5.0, 4.0, 0.0, 0.0];
        let baselines = [None, b(1.0, 1.0), b(1.0, 1.0), b(1.0, 1.0), b(1.0, 1.0)];
        let c = kernel.accumulate(&values, &baselines);
        // 5-1-1 = 3; 4-1-1+3 = 5; 0-1-1+5 = 3; 0-1-1+3 = 1
        assert_eq!(c, vec![None, Some(3.0), Some(5.0), Some(3.0), Some(1.0)]);
    }

    #[test]
    fn test_accumulate_first_value_starts_from_zero() {
        let kernel = CusumKernel::new(0.5);
        let c = kernel.accumulate(&[10.0, 0.0], &[b(0.0, 2.0), b(0.0, 2.0)]);
        assert_eq!(c, vec![Some(9.0), Some(8.0)]);
    }

    #[test]
    fn test_trailing_sum() {
        let stat = [None, None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let sums = CusumKernel::trailing_sum(&stat, 3);
        assert_eq!(sums, vec![None, None, None, None, Some(6.0), Some(9.0)]);
    }

    #[test]
    fn test_smooth() {
        let kernel = EwmaKernel::new(0.5);
        let z = kernel.smooth(&[2.0, 4.0, 0.0]);
        assert_eq!(z, vec![2.0, 3.0, 1.5]);
        assert!(kernel.smooth(&[]).is_empty());
    }

    #[test]
    fn test_lambda_one_returns_raw_values() {
        let values = [3.5, -1.0, 7.25, 0.0];
        assert_eq!(EwmaKernel::new(1.0).smooth(&values), values.to_vec());
        assert_relative_eq!(EwmaKernel::new(1.0).limit_factor(), 1.0);
    }
}
