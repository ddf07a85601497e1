//! Types shared by the detectors

use aberration_core::{Baseline, TimeSeries, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single raised warning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    /// Position in the (missing-free) series
    pub index: usize,
    pub timestamp: Timestamp,
    /// How far the statistic exceeded its limit
    pub margin: f64,
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alarm {{ index: {}, timestamp: {}, margin: {:.3} }}",
            self.index, self.timestamp, self.margin
        )
    }
}

/// Margins and warnings of a statistic against a per-index limit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Exceedance {
    pub margin: Vec<Option<f64>>,
    pub warning: Vec<Option<bool>>,
}

impl Exceedance {
    /// Compare `statistic` against `limit` index by index.
    ///
    /// Both must be defined for a margin to exist. Where the baseline is
    /// degenerate the margin is still reported but the warning is forced off.
    pub fn compare(
        statistic: &[Option<f64>],
        limit: &[Option<f64>],
        baseline: &[Option<Baseline>],
    ) -> Self {
        let mut margin = Vec::with_capacity(statistic.len());
        let mut warning = Vec::with_capacity(statistic.len());
        for i in 0..statistic.len() {
            match (statistic[i], limit.get(i).copied().flatten()) {
                (Some(s), Some(l)) => {
                    let degenerate = baseline
                        .get(i)
                        .copied()
                        .flatten()
                        .map_or(false, |b| b.is_degenerate());
                    let m = s - l;
                    margin.push(Some(m));
                    warning.push(Some(!degenerate && m > 0.0));
                }
                _ => {
                    margin.push(None);
                    warning.push(None);
                }
            }
        }
        Self { margin, warning }
    }
}

/// Indices whose warning is raised
pub(crate) fn raised(warning: &[Option<bool>]) -> Vec<usize> {
    warning
        .iter()
        .enumerate()
        .filter_map(|(i, w)| (*w == Some(true)).then_some(i))
        .collect()
}

/// Alarms with timestamps and margins for every raised warning
pub(crate) fn collect_alarms(
    series: &TimeSeries,
    margin: &[Option<f64>],
    warning: &[Option<bool>],
) -> Vec<Alarm> {
    raised(warning)
        .into_iter()
        .map(|index| Alarm {
            index,
            timestamp: series.timestamps()[index],
            margin: margin[index].unwrap_or(f64::NAN),
        })
        .collect()
}

/// Indices whose baseline exists but has zero spread
pub(crate) fn degenerate_indices(baseline: &[Option<Baseline>]) -> Vec<usize> {
    baseline
        .iter()
        .enumerate()
        .filter_map(|(i, b)| b.filter(Baseline::is_degenerate).map(|_| i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_undefined_stays_undefined() {
        let statistic = [None, Some(3.0), Some(1.0)];
        let limit = [Some(1.0), Some(2.0), None];
        let baseline = [None, Some(Baseline { mean: 0.0, sd: 1.0 }), None];
        let ex = Exceedance::compare(&statistic, &limit, &baseline);
        assert_eq!(ex.margin, vec![None, Some(1.0), None]);
        assert_eq!(ex.warning, vec![None, Some(true), None]);
    }

    #[test]
    fn test_compare_equal_is_not_a_warning() {
        let baseline = [Some(Baseline { mean: 0.0, sd: 1.0 })];
        let ex = Exceedance::compare(&[Some(2.0)], &[Some(2.0)], &baseline);
        assert_eq!(ex.warning, vec![Some(false)]);
    }

    #[test]
    fn test_compare_degenerate_suppresses_warning() {
        let baseline = [Some(Baseline { mean: 5.0, sd: 0.0 })];
        let ex = Exceedance::compare(&[Some(9.0)], &[Some(5.0)], &baseline);
        assert_eq!(ex.margin, vec![Some(4.0)]);
        assert_eq!(ex.warning, vec![Some(false)]);
        assert_eq!(degenerate_indices(&baseline), vec![0]);
    }

    #[test]
    fn test_collect_alarms() {
        let series = TimeSeries::new(vec![100, 101, 102], vec![Some(1.0); 3]).unwrap();
        let margin = [Some(-1.0), Some(0.5), Some(2.0)];
        let warning = [Some(false), Some(true), Some(true)];
        let alarms = collect_alarms(&series, &margin, &warning);
        assert_eq!(alarms.len(), 2);
        assert_eq!(alarms[0].timestamp, 101);
        assert_eq!(alarms[1].margin, 2.0);
    }
}
