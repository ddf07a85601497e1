//! Rolling baseline estimation
//!
//! A baseline at index `i` is the mean and sample standard deviation of the
//! raw observations in the half-open window
//! `[i - lag - width, i - lag)`. Indices whose window would start before the
//! beginning of the series have no baseline; callers receive `None` for them
//! rather than a zero or a NaN.

use crate::error::{Error, Result};
use crate::utils::{mean, std_dev};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Mean and sample standard deviation of a baseline window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub mean: f64,
    pub sd: f64,
}

impl Baseline {
    /// A zero (or non-finite) spread makes standardized thresholds meaningless
    pub fn is_degenerate(&self) -> bool {
        !(self.sd.is_finite() && self.sd > 0.0)
    }
}

/// Named, bounds-checked baseline window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineWindow {
    width: usize,
    lag: usize,
}

impl BaselineWindow {
    /// Create a window of `width` observations ending `lag` periods before
    /// the evaluated index.
    pub fn new(width: usize, lag: usize) -> Result<Self> {
        if width < 2 {
            return Err(Error::InvalidParameter(format!(
                "baseline window width must be at least 2, got {width}"
            )));
        }
        Ok(Self { width, lag })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    /// First index that has a full window behind it
    pub fn first_index(&self) -> usize {
        self.lag + self.width
    }

    /// Window covering index `index`, if it fits inside the history
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        let end = index.checked_sub(self.lag)?;
        let start = end.checked_sub(self.width)?;
        Some(start..end)
    }

    /// Baseline for a single index
    pub fn estimate(&self, values: &[f64], index: usize) -> Option<Baseline> {
        if index >= values.len() {
            return None;
        }
        let window = &values[self.range(index)?];
        Some(Baseline {
            mean: mean(window),
            sd: std_dev(window),
        })
    }

    /// Baselines for every index of `values`
    pub fn estimate_all(&self, values: &[f64]) -> Vec<Option<Baseline>> {
        (0..values.len())
            .map(|i| self.estimate(values, i))
            .collect()
    }
}

/// Baseline at `index` from the window `[index - lag_offset - move_t, index - lag_offset)`.
///
/// Returns `Ok(None)` when the window does not fit inside the series.
pub fn estimate(
    values: &[f64],
    index: usize,
    move_t: usize,
    lag_offset: usize,
) -> Result<Option<Baseline>> {
    Ok(BaselineWindow::new(move_t, lag_offset)?.estimate(values, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_window_range() {
        let window = BaselineWindow::new(4, 0).unwrap();
        assert_eq!(window.range(3), None);
        assert_eq!(window.range(4), Some(0..4));
        assert_eq!(window.range(9), Some(5..9));

        let lagged = BaselineWindow::new(4, 2).unwrap();
        assert_eq!(lagged.first_index(), 6);
        assert_eq!(lagged.range(5), None);
        assert_eq!(lagged.range(6), Some(0..4));
    }

    #[test]
    fn test_width_validation() {
        assert!(matches!(
            BaselineWindow::new(0, 0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            BaselineWindow::new(1, 3),
            Err(Error::InvalidParameter(_))
        ));
        assert!(BaselineWindow::new(2, 0).is_ok());
    }

    #[test]
    fn test_estimate_uses_raw_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        let baseline = estimate(&values, 4, 4, 0).unwrap().unwrap();
        assert_relative_eq!(baseline.mean, 2.5);
        assert_relative_eq!(baseline.sd, (5.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_estimate_undefined_before_first_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let all = BaselineWindow::new(3, 1).unwrap().estimate_all(&values);
        assert_eq!(all.iter().take_while(|b| b.is_none()).count(), 4);
        assert!(all[4..].iter().all(Option::is_some));
    }

    #[test]
    fn test_estimate_out_of_bounds_index() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(estimate(&values, 10, 2, 0).unwrap(), None);
    }

    #[test]
    fn test_degenerate_baseline() {
        let values = [5.0, 5.0, 5.0, 9.0];
        let baseline = estimate(&values, 3, 3, 0).unwrap().unwrap();
        assert!(baseline.is_degenerate());
        assert!(!Baseline { mean: 0.0, sd: 1.0 }.is_degenerate());
    }

    proptest! {
        #[test]
        fn prop_baseline_mean_within_window_range(
            values in prop::collection::vec(-1e3f64..1e3, 6..60),
            width in 2usize..5,
            lag in 0usize..3,
        ) {
            let window = BaselineWindow::new(width, lag).unwrap();
            for (i, baseline) in window.estimate_all(&values).into_iter().enumerate() {
                match (baseline, window.range(i)) {
                    (Some(b), Some(r)) => {
                        let slice = &values[r];
                        let lo = slice.iter().cloned().fold(f64::INFINITY, f64::min);
                        let hi = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                        prop_assert!(b.mean >= lo - 1e-9 && b.mean <= hi + 1e-9);
                        prop_assert!(b.sd >= 0.0);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "baseline and range disagree at {}", i),
                }
            }
        }
    }
}
