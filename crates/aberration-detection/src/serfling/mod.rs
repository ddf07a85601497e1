//! Adjusted Serfling regression
//!
//! A seasonal baseline (quadratic trend plus one sine/cosine pair per cycle)
//! is fitted by least squares, then refitted with presumed epidemic points
//! removed for as long as the adjusted R² keeps increasing. Observations
//! above the final model's upper prediction bound raise a warning.
//!
//! ```rust
//! use aberration_detection::{AberrationDetector, AdjustedSerfling, SerflingParameters};
//! use aberration_core::TimeSeries;
//!
//! let values: Vec<f64> = (1..=104)
//!     .map(|t| {
//!         let t = t as f64;
//!         50.0 + 10.0 * (2.0 * std::f64::consts::PI * t / 52.0).sin() + (t * 0.9).sin()
//!     })
//!     .collect();
//! let series = TimeSeries::from_values(values).unwrap();
//!
//! let detector = AdjustedSerfling::new(SerflingParameters::default()).unwrap();
//! let model = detector.detect(&series).unwrap();
//! assert!(model.fit_times() >= 2);
//! assert_eq!(model.output().len(), 104);
//! ```

mod basis;
mod fit;
mod model;
mod predict;

pub use basis::SerflingBasis;
pub use fit::{Convergence, IterationRecord, Termination};
pub use model::{SerflingModel, SerflingOutput};
pub use predict::{predict, predict_checked};

use crate::traits::{AberrationDetector, ConfigurableDetector, DetectorProperties};
use aberration_core::{Error, Result, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Adjusted Serfling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerflingParameters {
    /// Seasonal cycle lengths in periods, e.g. `[52, 26]` for weekly data
    pub cycles: Vec<u32>,
    /// Prediction interval level
    pub level: f64,
    /// Upper bound on fit attempts
    pub max_iterations: usize,
}

impl Default for SerflingParameters {
    fn default() -> Self {
        Self {
            cycles: vec![52],
            level: 0.95,
            max_iterations: 100,
        }
    }
}

impl SerflingParameters {
    pub fn validate(&self) -> Result<()> {
        if self.cycles.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one cycle length is required".to_string(),
            ));
        }
        // cycles of 1 or 2 periods give an all-zero sine column
        if let Some(cycle) = self.cycles.iter().find(|&&c| c < 3) {
            return Err(Error::InvalidParameter(format!(
                "cycle lengths must be at least 3, got {cycle}"
            )));
        }
        let mut sorted = self.cycles.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::InvalidParameter(format!(
                "duplicate cycle lengths in {:?}",
                self.cycles
            )));
        }
        if !(self.level > 0.0 && self.level < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "level must be in (0, 1), got {}",
                self.level
            )));
        }
        if self.max_iterations < 2 {
            return Err(Error::InvalidParameter(format!(
                "max_iterations must be at least 2, got {}",
                self.max_iterations
            )));
        }
        Ok(())
    }
}

/// Adjusted Serfling detector
#[derive(Debug, Clone)]
pub struct AdjustedSerfling {
    basis: SerflingBasis,
    params: SerflingParameters,
}

impl AdjustedSerfling {
    pub fn new(params: SerflingParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            basis: SerflingBasis::new(&params.cycles),
            params,
        })
    }

    pub fn basis(&self) -> &SerflingBasis {
        &self.basis
    }
}

impl DetectorProperties for AdjustedSerfling {
    fn algorithm_name(&self) -> &'static str {
        "Adjusted Serfling"
    }

    /// Every training point is annotated once a fit exists
    fn minimum_history(&self) -> usize {
        0
    }
}

impl AberrationDetector for AdjustedSerfling {
    type Output = SerflingModel;

    #[instrument(skip_all, fields(n = series.len(), cycles = ?self.params.cycles))]
    fn detect(&self, series: &TimeSeries) -> Result<SerflingModel> {
        let values = series.values();
        let design = self.basis.design(1, values.len());
        let refinement =
            fit::refine(&design, values, self.params.level, self.params.max_iterations)?;

        let excluded = (0..values.len())
            .filter(|&i| !refinement.retained.is_included(i))
            .collect();

        Ok(SerflingModel {
            output: SerflingOutput::from_intervals(series.clone(), &refinement.intervals),
            best_fit: refinement.best_fit,
            fit_times: refinement.fit_times,
            best_iteration: refinement.best_iteration,
            cycles: self.params.cycles.clone(),
            level: self.params.level,
            history: refinement.history,
            convergence: refinement.convergence,
            termination: refinement.termination,
            excluded,
            training_len: series.len(),
            last_timestamp: series.last_timestamp(),
            step: series.step(),
        })
    }
}

impl ConfigurableDetector for AdjustedSerfling {
    type Parameters = SerflingParameters;

    fn with_parameters(params: Self::Parameters) -> Result<Self> {
        Self::new(params)
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }
}
