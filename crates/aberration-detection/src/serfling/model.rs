//! Fitted Serfling models and their annotated output

use super::fit::{Convergence, IterationRecord, Termination};
use crate::types::Alarm;
use aberration_core::{Error, Result, TimeSeries, Timestamp};
use aberration_regression::{OlsFit, PredictionInterval, RowMask};
use serde::{Deserialize, Serialize};

/// Series annotated with the seasonal baseline and its prediction interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerflingOutput {
    series: TimeSeries,
    fit: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    margin: Vec<f64>,
    warning: Vec<bool>,
}

impl SerflingOutput {
    pub(crate) fn from_intervals(series: TimeSeries, intervals: &[PredictionInterval]) -> Self {
        let margin: Vec<f64> = series
            .values()
            .iter()
            .zip(intervals)
            .map(|(x, interval)| x - interval.upper)
            .collect();
        Self {
            warning: margin.iter().map(|&m| m > 0.0).collect(),
            fit: intervals.iter().map(|i| i.fit).collect(),
            lower: intervals.iter().map(|i| i.lower).collect(),
            upper: intervals.iter().map(|i| i.upper).collect(),
            margin,
            series,
        }
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Point estimate of the seasonal baseline
    pub fn fit(&self) -> &[f64] {
        &self.fit
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Observation minus upper prediction bound
    pub fn margin(&self) -> &[f64] {
        &self.margin
    }

    pub fn warning(&self) -> &[bool] {
        &self.warning
    }

    pub fn alarm_indices(&self) -> Vec<usize> {
        self.warning
            .iter()
            .enumerate()
            .filter_map(|(i, &w)| w.then_some(i))
            .collect()
    }

    pub fn alarm_count(&self) -> usize {
        self.warning.iter().filter(|&&w| w).count()
    }

    pub fn alarms(&self) -> Vec<Alarm> {
        self.alarm_indices()
            .into_iter()
            .map(|index| Alarm {
                index,
                timestamp: self.series.timestamps()[index],
                margin: self.margin[index],
            })
            .collect()
    }
}

/// A fitted adjusted Serfling model
///
/// Holds the regression retained after iterative exclusion together with
/// everything needed to project it onto a following series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerflingModel {
    pub(crate) output: SerflingOutput,
    pub(crate) best_fit: OlsFit,
    pub(crate) fit_times: usize,
    pub(crate) best_iteration: usize,
    pub(crate) cycles: Vec<u32>,
    pub(crate) level: f64,
    pub(crate) history: Vec<IterationRecord>,
    pub(crate) convergence: Convergence,
    pub(crate) termination: Termination,
    pub(crate) excluded: Vec<usize>,
    pub(crate) training_len: usize,
    pub(crate) last_timestamp: Option<Timestamp>,
    pub(crate) step: Option<i64>,
}

impl SerflingModel {
    /// Training series annotated by the final model
    pub fn output(&self) -> &SerflingOutput {
        &self.output
    }

    /// Regression retained as the seasonal baseline
    pub fn best_fit(&self) -> &OlsFit {
        &self.best_fit
    }

    /// Number of fit attempts, including the one that stopped the loop
    pub fn fit_times(&self) -> usize {
        self.fit_times
    }

    /// Attempt that produced `best_fit`
    pub fn best_iteration(&self) -> usize {
        self.best_iteration
    }

    pub fn cycles(&self) -> &[u32] {
        &self.cycles
    }

    /// Prediction interval level
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    pub fn convergence(&self) -> &Convergence {
        &self.convergence
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Training points left out of `best_fit`
    pub fn excluded_indices(&self) -> &[usize] {
        &self.excluded
    }

    /// Training points `best_fit` was fitted on
    pub fn retained_mask(&self) -> RowMask {
        RowMask::from_fn(self.training_len, |i| self.excluded.binary_search(&i).is_err())
    }

    pub fn training_len(&self) -> usize {
        self.training_len
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.last_timestamp
    }

    pub fn step(&self) -> Option<i64> {
        self.step
    }

    /// Check that `series` starts one step after the training data and
    /// shares its spacing.
    ///
    /// An empty series trivially continues the training data.
    pub fn check_continuation(&self, series: &TimeSeries) -> Result<()> {
        let (Some(last), Some(step)) = (self.last_timestamp, self.step) else {
            return Err(Error::InvalidInput(
                "model has no time resolution to continue from".to_string(),
            ));
        };
        let Some(first) = series.first_timestamp() else {
            return Ok(());
        };
        let expected = last.checked_add(step).ok_or_else(|| {
            Error::InvalidInput(format!(
                "training data ends at {last}; the next timestamp overflows"
            ))
        })?;
        if first != expected {
            return Err(Error::Discontinuity {
                expected,
                actual: first,
            });
        }
        if let Some(new_step) = series.step() {
            if new_step != step {
                return Err(Error::Discontinuity {
                    expected: first + step,
                    actual: first + new_step,
                });
            }
        }
        Ok(())
    }

    /// Project the model onto a series that follows the training data
    pub fn predict(&self, series: &TimeSeries) -> Result<SerflingOutput> {
        super::predict::predict(self, series)
    }

    /// [`predict`](Self::predict) after [`check_continuation`](Self::check_continuation)
    pub fn predict_checked(&self, series: &TimeSeries) -> Result<SerflingOutput> {
        super::predict::predict_checked(self, series)
    }
}
