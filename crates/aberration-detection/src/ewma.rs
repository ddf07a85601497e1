//! EWMA outbreak detection
//!
//! The smoothed statistic runs over the whole series from the first
//! observation. Its control limit comes from a baseline window that skips the
//! `ignore_t` periods just before the evaluated index, so an outbreak that is
//! already under way does not raise its own limit.

use crate::kernel::EwmaKernel;
use crate::traits::{AberrationDetector, ConfigurableDetector, DetectorProperties};
use crate::types::{collect_alarms, degenerate_indices, raised, Alarm, Exceedance};
use aberration_core::{Baseline, BaselineWindow, Error, Result, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// EWMA parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EwmaParameters {
    /// Smoothing factor in `(0, 1]`
    pub lambda: f64,
    /// Control-limit multiplier (typically 2-3)
    pub k: f64,
    /// Baseline window width
    pub move_t: usize,
    /// Periods skipped between the baseline window and the evaluated index
    pub ignore_t: usize,
}

impl Default for EwmaParameters {
    fn default() -> Self {
        Self {
            lambda: 0.4,
            k: 3.0,
            move_t: 4,
            ignore_t: 2,
        }
    }
}

impl EwmaParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.lambda > 0.0 && self.lambda <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "lambda must be in (0, 1], got {}",
                self.lambda
            )));
        }
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "k must be positive and finite, got {}",
                self.k
            )));
        }
        BaselineWindow::new(self.move_t, self.ignore_t).map(|_| ())
    }
}

/// Annotated output of the EWMA detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EwmaResult {
    series: TimeSeries,
    smoothed: Vec<f64>,
    baseline: Vec<Option<Baseline>>,
    ucl: Vec<Option<f64>>,
    margin: Vec<Option<f64>>,
    warning: Vec<Option<bool>>,
    degenerate: Vec<usize>,
}

impl EwmaResult {
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Smoothed statistic, defined at every index
    pub fn smoothed(&self) -> &[f64] {
        &self.smoothed
    }

    pub fn baseline(&self) -> &[Option<Baseline>] {
        &self.baseline
    }

    /// Upper control limit
    pub fn ucl(&self) -> &[Option<f64>] {
        &self.ucl
    }

    pub fn margin(&self) -> &[Option<f64>] {
        &self.margin
    }

    pub fn warning(&self) -> &[Option<bool>] {
        &self.warning
    }

    pub fn alarm_indices(&self) -> Vec<usize> {
        raised(&self.warning)
    }

    pub fn alarm_count(&self) -> usize {
        self.alarm_indices().len()
    }

    pub fn alarms(&self) -> Vec<Alarm> {
        collect_alarms(&self.series, &self.margin, &self.warning)
    }

    pub fn degenerate_indices(&self) -> &[usize] {
        &self.degenerate
    }
}

/// EWMA detector
#[derive(Debug, Clone)]
pub struct EwmaDetector {
    kernel: EwmaKernel,
    window: BaselineWindow,
    params: EwmaParameters,
}

impl EwmaDetector {
    pub fn new(params: EwmaParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            kernel: EwmaKernel::new(params.lambda),
            window: BaselineWindow::new(params.move_t, params.ignore_t)?,
            params,
        })
    }
}

impl DetectorProperties for EwmaDetector {
    fn algorithm_name(&self) -> &'static str {
        "EWMA"
    }

    fn minimum_history(&self) -> usize {
        self.window.first_index()
    }
}

impl AberrationDetector for EwmaDetector {
    type Output = EwmaResult;

    #[instrument(skip_all, fields(n = series.len(), lambda = self.params.lambda, k = self.params.k))]
    fn detect(&self, series: &TimeSeries) -> Result<EwmaResult> {
        let values = series.values();
        let smoothed = self.kernel.smooth(values);
        let baseline = self.window.estimate_all(values);

        let spread = self.params.k * self.kernel.limit_factor();
        let ucl: Vec<Option<f64>> = baseline
            .iter()
            .map(|b| b.map(|b| b.mean + spread * b.sd))
            .collect();

        let statistic: Vec<Option<f64>> = smoothed.iter().copied().map(Some).collect();
        let Exceedance { margin, warning } = Exceedance::compare(&statistic, &ucl, &baseline);

        let degenerate = degenerate_indices(&baseline);
        if !degenerate.is_empty() {
            debug!(count = degenerate.len(), "zero-variance baseline windows, warnings suppressed");
        }

        let result = EwmaResult {
            series: series.clone(),
            smoothed,
            baseline,
            ucl,
            margin,
            warning,
            degenerate,
        };
        debug!(alarms = result.alarm_count(), "ewma alarms");
        Ok(result)
    }
}

impl ConfigurableDetector for EwmaDetector {
    type Parameters = EwmaParameters;

    fn with_parameters(params: Self::Parameters) -> Result<Self> {
        Self::new(params)
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }
}
