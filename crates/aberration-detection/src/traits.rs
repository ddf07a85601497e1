//! Core traits for aberration detection
//!
//! Every detector is a pure function of its parameters and the input
//! series: no state is carried between calls, so one detector value can be
//! shared freely across threads.

use aberration_core::{Result, TimeSeries};

/// Properties of a detector that don't depend on the input
pub trait DetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// First (0-based) index that can carry a warning
    fn minimum_history(&self) -> usize;
}

/// Core trait for outbreak detectors
pub trait AberrationDetector: DetectorProperties {
    /// Annotated series (or fitted model) produced by the detector
    type Output;

    /// Run the detector over a complete, ordered series
    fn detect(&self, series: &TimeSeries) -> Result<Self::Output>;

    /// Run the detector over several unrelated series.
    ///
    /// Sequential by default; with the `parallel` feature the series are
    /// processed on the rayon thread pool.
    fn detect_batch(&self, batch: &[TimeSeries]) -> Result<Vec<Self::Output>>
    where
        Self: Sized + Sync,
        Self::Output: Send,
    {
        run_batch(self, batch)
    }
}

/// Detectors whose parameters can be inspected and replaced
pub trait ConfigurableDetector: Sized {
    type Parameters;

    /// Build a detector, validating the parameters
    fn with_parameters(params: Self::Parameters) -> Result<Self>;

    fn parameters(&self) -> &Self::Parameters;

    /// Replace the parameters; on error the detector is left unchanged
    fn set_parameters(&mut self, params: Self::Parameters) -> Result<()> {
        *self = Self::with_parameters(params)?;
        Ok(())
    }
}

#[cfg(not(feature = "parallel"))]
fn run_batch<D>(detector: &D, batch: &[TimeSeries]) -> Result<Vec<D::Output>>
where
    D: AberrationDetector,
{
    batch.iter().map(|series| detector.detect(series)).collect()
}

#[cfg(feature = "parallel")]
fn run_batch<D>(detector: &D, batch: &[TimeSeries]) -> Result<Vec<D::Output>>
where
    D: AberrationDetector + Sync,
    D::Output: Send,
{
    use rayon::prelude::*;
    batch.par_iter().map(|series| detector.detect(series)).collect()
}
