//! Ordered, equally spaced surveillance series
//!
//! A [`TimeSeries`] is the only input every detector accepts. Construction
//! validates ordering and spacing of the raw timestamps and then drops
//! missing observations, so detectors never see gaps inside a window.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordinal period index (week number, month number, days since epoch, ...)
pub type Timestamp = i64;

/// A single observed value at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Timestamp,
    pub value: f64,
}

/// Time-ordered series of observations with missing values removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    timestamps: Vec<Timestamp>,
    values: Vec<f64>,
    step: Option<i64>,
    dropped: usize,
}

impl TimeSeries {
    /// Build a series from raw columns.
    ///
    /// `None` and `NaN` are treated as missing and removed after the raw
    /// timestamps have been checked for strict ordering and equal spacing.
    pub fn new(timestamps: Vec<Timestamp>, values: Vec<Option<f64>>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(Error::size_mismatch(
                timestamps.len(),
                values.len(),
                "time series columns",
            ));
        }

        let step = validate_spacing(&timestamps)?;

        if values.iter().flatten().any(|v| v.is_infinite()) {
            return Err(Error::non_finite("observations"));
        }

        let raw_len = timestamps.len();
        let (timestamps, values): (Vec<_>, Vec<_>) = timestamps
            .into_iter()
            .zip(values)
            .filter_map(|(t, v)| match v {
                Some(v) if !v.is_nan() => Some((t, v)),
                _ => None,
            })
            .unzip();

        let dropped = raw_len - values.len();
        if dropped > 0 {
            debug!(dropped, retained = values.len(), "removed missing observations");
        }

        Ok(Self {
            timestamps,
            values,
            step,
            dropped,
        })
    }

    /// Build a series from values alone, indexed `1..=n`
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        let timestamps = (1..=values.len() as Timestamp).collect();
        Self::new(timestamps, values.into_iter().map(Some).collect())
    }

    /// Number of (non-missing) observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation column
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Iterate over `(timestamp, value)` pairs
    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.timestamps
            .iter()
            .zip(&self.values)
            .map(|(&timestamp, &value)| Observation { timestamp, value })
    }

    /// Spacing of the raw timestamps, `None` when fewer than two raw rows were given
    pub fn step(&self) -> Option<i64> {
        self.step
    }

    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.timestamps.first().copied()
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.timestamps.last().copied()
    }

    /// Number of missing rows removed at construction
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Whether this series starts exactly one `step` after `previous_last`
    /// and shares that spacing.
    pub fn follows(&self, previous_last: Timestamp, step: i64) -> bool {
        let starts_next = previous_last
            .checked_add(step)
            .is_some_and(|next| self.first_timestamp() == Some(next));
        let same_step = self.step.map_or(true, |s| s == step);
        starts_next && same_step
    }
}

/// Check strict ordering and equal spacing, returning the common step.
fn validate_spacing(timestamps: &[Timestamp]) -> Result<Option<i64>> {
    let gap = |i: usize| {
        timestamps[i].checked_sub(timestamps[i - 1]).ok_or_else(|| {
            Error::InvalidInput(format!(
                "timestamp gap overflows at index {i} ({} after {})",
                timestamps[i],
                timestamps[i - 1]
            ))
        })
    };
    if timestamps.len() < 2 {
        return Ok(None);
    }
    let step = gap(1)?;
    if step <= 0 {
        return Err(Error::InvalidInput(format!(
            "timestamps must be strictly increasing (index 1: {} after {})",
            timestamps[1], timestamps[0]
        )));
    }
    for i in 2..timestamps.len() {
        let current = gap(i)?;
        if current != step {
            return Err(Error::InvalidInput(format!(
                "timestamps must be equally spaced: step {current} at index {i}, expected {step}"
            )));
        }
    }
    Ok(Some(step))
}
