//! Iterative exclusion of epidemic points
//!
//! Each pass refits the seasonal baseline on the points lying at or below the
//! previous model: below the point estimate after the initial fit, below the
//! upper prediction bound afterwards. The masks are rebuilt over every point
//! each time. The loop hill-climbs on adjusted R² and keeps the last fit that
//! improved it.

use aberration_core::{Error, Result};
use aberration_regression::{OlsFit, PredictionInterval, RowMask};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One fit attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based attempt number
    pub iteration: usize,
    /// Points the attempt was fitted on
    pub retained: usize,
    /// `None` when the retained points could not support a fit
    pub adjusted_r_squared: Option<f64>,
}

/// The comparison that ended the loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Convergence {
    pub improved: bool,
    pub adj_r2_prev: f64,
    pub adj_r2_curr: Option<f64>,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Adjusted R² stopped increasing
    Converged,
    /// `max_iterations` attempts were made while still improving
    IterationCap,
    /// Too few (or collinear) points were left to fit
    Exhausted,
}

#[derive(Debug)]
pub(crate) struct Refinement {
    pub best_fit: OlsFit,
    pub intervals: Vec<PredictionInterval>,
    pub retained: RowMask,
    pub best_iteration: usize,
    pub fit_times: usize,
    pub history: Vec<IterationRecord>,
    pub convergence: Convergence,
    pub termination: Termination,
}

/// A fit that cannot be computed on the retained rows is a failed attempt, not an error
fn fit_retained(design: &DMatrix<f64>, values: &[f64], mask: &RowMask) -> Result<Option<OlsFit>> {
    match OlsFit::fit(design, values, mask) {
        Ok(fit) => Ok(Some(fit)),
        Err(Error::InsufficientData { .. }) | Err(Error::Computation(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

pub(crate) fn refine(
    design: &DMatrix<f64>,
    values: &[f64],
    level: f64,
    max_iterations: usize,
) -> Result<Refinement> {
    let n = values.len();
    let all = RowMask::all(n);

    let mut best_fit = OlsFit::fit(design, values, &all)?;
    let mut intervals = best_fit.predict(design, level)?;
    let mut retained = all;
    let mut best_iteration = 1;
    let mut fit_times = 1;
    let mut history = vec![IterationRecord {
        iteration: 1,
        retained: n,
        adjusted_r_squared: Some(best_fit.adjusted_r_squared()),
    }];
    debug!(
        iteration = 1,
        retained = n,
        adjusted_r_squared = best_fit.adjusted_r_squared(),
        "serfling fit"
    );

    let mut mask = RowMask::from_fn(n, |i| values[i] <= intervals[i].fit);

    let (convergence, termination) = loop {
        fit_times += 1;
        let attempt = fit_retained(design, values, &mask)?;
        let prev = best_fit.adjusted_r_squared();
        let curr = attempt.as_ref().map(OlsFit::adjusted_r_squared);
        let improved = curr.map_or(false, |c| c > prev);

        history.push(IterationRecord {
            iteration: fit_times,
            retained: mask.count(),
            adjusted_r_squared: curr,
        });
        debug!(
            iteration = fit_times,
            retained = mask.count(),
            adjusted_r_squared = ?curr,
            improved,
            "serfling fit"
        );

        let convergence = Convergence {
            improved,
            adj_r2_prev: prev,
            adj_r2_curr: curr,
        };
        best_fit = match attempt {
            Some(fit) if improved => fit,
            Some(_) => break (convergence, Termination::Converged),
            None => break (convergence, Termination::Exhausted),
        };
        intervals = best_fit.predict(design, level)?;
        retained = mask;
        best_iteration = fit_times;

        if fit_times >= max_iterations {
            break (convergence, Termination::IterationCap);
        }
        mask = RowMask::from_fn(n, |i| values[i] <= intervals[i].upper);
    };

    debug!(
        fit_times,
        best_iteration,
        ?termination,
        adjusted_r_squared = best_fit.adjusted_r_squared(),
        "serfling refinement finished"
    );

    Ok(Refinement {
        best_fit,
        intervals,
        retained,
        best_iteration,
        fit_times,
        history,
        convergence,
        termination,
    })
}
