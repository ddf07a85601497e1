//! Modified CUSUM outbreak detection
//!
//! Three correlated cumulative sums are computed over the same series:
//!
//! - **C1′** compares each observation with the `move_t` observations just
//!   before it.
//! - **C2′** uses a baseline window lagged by two periods so that an outbreak
//!   already under way does not inflate its own baseline.
//! - **C3′** is the sum of the current and two previous C2′ values.
//!
//! All three are thresholded against `h·σ` where `σ` is the standard
//! deviation of the most recent (C1′) window.

use crate::kernel::CusumKernel;
use crate::traits::{AberrationDetector, ConfigurableDetector, DetectorProperties};
use crate::types::{collect_alarms, degenerate_indices, raised, Alarm, Exceedance};
use aberration_core::{Baseline, BaselineWindow, Error, Result, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Periods between the evaluated index and the end of the C2′ baseline window
const LAGGED_OFFSET: usize = 2;

/// Number of C2′ terms summed into C3′
const C3_TERMS: usize = 3;

/// Modified CUSUM parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CusumParameters {
    /// Sensitivity coefficient (typically 0.5-1.5)
    pub k: f64,
    /// Threshold coefficient (typically 2-5)
    pub h: f64,
    /// Baseline window width
    pub move_t: usize,
}

impl Default for CusumParameters {
    fn default() -> Self {
        Self {
            k: 1.0,
            h: 2.5,
            move_t: 4,
        }
    }
}

impl CusumParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.k.is_finite() && self.k > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "k must be positive and finite, got {}",
                self.k
            )));
        }
        if !(self.h.is_finite() && self.h > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "h must be positive and finite, got {}",
                self.h
            )));
        }
        BaselineWindow::new(self.move_t, 0).map(|_| ())
    }
}

/// CUSUM variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    C1,
    C2,
    C3,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::C1, Variant::C2, Variant::C3];

    /// Column name used for this variant's statistic
    pub fn column_prefix(&self) -> &'static str {
        match self {
            Variant::C1 => "C1_prime",
            Variant::C2 => "C2_prime",
            Variant::C3 => "C3_prime",
        }
    }
}

/// Statistic, margin and warning columns of one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CusumTrack {
    statistic: Vec<Option<f64>>,
    margin: Vec<Option<f64>>,
    warning: Vec<Option<bool>>,
}

impl CusumTrack {
    fn new(statistic: Vec<Option<f64>>, threshold: &[Option<f64>], baseline: &[Option<Baseline>]) -> Self {
        let Exceedance { margin, warning } = Exceedance::compare(&statistic, threshold, baseline);
        Self {
            statistic,
            margin,
            warning,
        }
    }

    /// Accumulated statistic, `None` before the variant's first window
    pub fn statistic(&self) -> &[Option<f64>] {
        &self.statistic
    }

    /// Statistic minus threshold
    pub fn margin(&self) -> &[Option<f64>] {
        &self.margin
    }

    pub fn warning(&self) -> &[Option<bool>] {
        &self.warning
    }

    /// First index with a defined statistic
    pub fn first_defined(&self) -> Option<usize> {
        self.statistic.iter().position(Option::is_some)
    }
}

/// Annotated output of the modified CUSUM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CusumResult {
    series: TimeSeries,
    baseline: Vec<Option<Baseline>>,
    lagged_baseline: Vec<Option<Baseline>>,
    threshold: Vec<Option<f64>>,
    c1: CusumTrack,
    c2: CusumTrack,
    c3: CusumTrack,
    degenerate: Vec<usize>,
}

impl CusumResult {
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// C1′ baseline (window ending just before each index)
    pub fn baseline(&self) -> &[Option<Baseline>] {
        &self.baseline
    }

    /// C2′ baseline (window lagged by two periods)
    pub fn lagged_baseline(&self) -> &[Option<Baseline>] {
        &self.lagged_baseline
    }

    /// `h·σ` of the C1′ window, shared by all variants
    pub fn threshold(&self) -> &[Option<f64>] {
        &self.threshold
    }

    pub fn track(&self, variant: Variant) -> &CusumTrack {
        match variant {
            Variant::C1 => &self.c1,
            Variant::C2 => &self.c2,
            Variant::C3 => &self.c3,
        }
    }

    pub fn alarm_indices(&self, variant: Variant) -> Vec<usize> {
        raised(self.track(variant).warning())
    }

    pub fn alarm_count(&self, variant: Variant) -> usize {
        self.alarm_indices(variant).len()
    }

    pub fn alarms(&self, variant: Variant) -> Vec<Alarm> {
        let track = self.track(variant);
        collect_alarms(&self.series, track.margin(), track.warning())
    }

    /// Indices whose C1′ window has zero spread; warnings are suppressed there
    pub fn degenerate_indices(&self) -> &[usize] {
        &self.degenerate
    }
}

/// Modified CUSUM detector
#[derive(Debug, Clone)]
pub struct ModifiedCusum {
    kernel: CusumKernel,
    recent: BaselineWindow,
    lagged: BaselineWindow,
    params: CusumParameters,
}

impl ModifiedCusum {
    /// Create a new detector, validating the parameters
    pub fn new(params: CusumParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            kernel: CusumKernel::new(params.k),
            recent: BaselineWindow::new(params.move_t, 0)?,
            lagged: BaselineWindow::new(params.move_t, LAGGED_OFFSET)?,
            params,
        })
    }
}

impl DetectorProperties for ModifiedCusum {
    fn algorithm_name(&self) -> &'static str {
        "Modified CUSUM"
    }

    fn minimum_history(&self) -> usize {
        self.recent.first_index()
    }
}

impl AberrationDetector for ModifiedCusum {
    type Output = CusumResult;

    #[instrument(skip_all, fields(n = series.len(), k = self.params.k, h = self.params.h, move_t = self.params.move_t))]
    fn detect(&self, series: &TimeSeries) -> Result<CusumResult> {
        let values = series.values();

        let baseline = self.recent.estimate_all(values);
        let lagged_baseline = self.lagged.estimate_all(values);
        let threshold: Vec<Option<f64>> = baseline
            .iter()
            .map(|b| b.map(|b| self.params.h * b.sd))
            .collect();

        let c1 = self.kernel.accumulate(values, &baseline);
        let c2 = self.kernel.accumulate(values, &lagged_baseline);
        let c3 = CusumKernel::trailing_sum(&c2, C3_TERMS);

        let degenerate = degenerate_indices(&baseline);
        if !degenerate.is_empty() {
            debug!(count = degenerate.len(), "zero-variance baseline windows, warnings suppressed");
        }

        let result = CusumResult {
            c1: CusumTrack::new(c1, &threshold, &baseline),
            c2: CusumTrack::new(c2, &threshold, &baseline),
            c3: CusumTrack::new(c3, &threshold, &baseline),
            series: series.clone(),
            baseline,
            lagged_baseline,
            threshold,
            degenerate,
        };
        debug!(
            c1 = result.alarm_count(Variant::C1),
            c2 = result.alarm_count(Variant::C2),
            c3 = result.alarm_count(Variant::C3),
            "cusum alarms"
        );
        Ok(result)
    }
}

impl ConfigurableDetector for ModifiedCusum {
    type Parameters = CusumParameters;

    fn with_parameters(params: Self::Parameters) -> Result<Self> {
        Self::new(params)
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }
}
