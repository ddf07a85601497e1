//! Ordinary least squares with prediction intervals
//!
//! Fits are computed on the rows selected by a [`RowMask`] using a
//! Householder QR decomposition of the design matrix. The fitted model keeps
//! only plain vectors (coefficients, unscaled covariance) so it can be
//! serialized and reused for prediction on new design rows.

use crate::mask::RowMask;
use aberration_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::trace;

/// Relative tolerance on the R diagonal below which the design is treated as rank deficient
const RANK_TOLERANCE: f64 = 1e-10;

/// Point prediction with its prediction interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInterval {
    pub fit: f64,
    pub lower: f64,
    pub upper: f64,
}

/// A fitted linear model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OlsFit {
    coefficients: Vec<f64>,
    /// (XᵀX)⁻¹, row-major p × p
    unscaled_covariance: Vec<f64>,
    residual_variance: f64,
    df_residual: usize,
    n_obs: usize,
    r_squared: f64,
    adjusted_r_squared: f64,
}

impl OlsFit {
    /// Fit `response ~ design` on the rows included by `mask`.
    ///
    /// The design is expected to carry its own intercept column.
    pub fn fit(design: &DMatrix<f64>, response: &[f64], mask: &RowMask) -> Result<Self> {
        let (n, p) = design.shape();
        if response.len() != n {
            return Err(Error::size_mismatch(n, response.len(), "regression response"));
        }
        if mask.len() != n {
            return Err(Error::size_mismatch(n, mask.len(), "row mask"));
        }
        if p == 0 {
            return Err(Error::InvalidInput("design matrix has no columns".to_string()));
        }

        let rows: Vec<usize> = mask.included().collect();
        let m = rows.len();
        if m <= p {
            return Err(Error::InsufficientData {
                expected: p + 1,
                actual: m,
            });
        }

        let x = design.select_rows(rows.iter());
        let y = DVector::from_iterator(m, rows.iter().map(|&i| response[i]));

        let qr = x.clone().qr();
        let r = qr.r();
        let diag_max = r.diagonal().iter().fold(0.0f64, |acc, d| acc.max(d.abs()));
        if r
            .diagonal()
            .iter()
            .any(|d| d.abs() <= diag_max * RANK_TOLERANCE)
        {
            return Err(Error::Computation(
                "design matrix is rank deficient".to_string(),
            ));
        }

        let qty = qr.q().transpose() * &y;
        let beta = r.solve_upper_triangular(&qty).ok_or_else(|| {
            Error::Computation("failed to solve least squares system".to_string())
        })?;
        let r_inv = r
            .solve_upper_triangular(&DMatrix::identity(p, p))
            .ok_or_else(|| Error::Computation("failed to invert R factor".to_string()))?;
        let covariance = &r_inv * r_inv.transpose();

        let residuals = &y - &x * &beta;
        let rss = residuals.norm_squared();
        let mean_y = y.mean();
        let tss: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();

        let df_residual = m - p;
        // A constant response has nothing left to explain
        let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { 0.0 };
        let adjusted_r_squared =
            1.0 - (1.0 - r_squared) * (m as f64 - 1.0) / df_residual as f64;

        trace!(rows = m, columns = p, r_squared, adjusted_r_squared, "ols fit");

        let mut unscaled_covariance = Vec::with_capacity(p * p);
        for i in 0..p {
            for j in 0..p {
                unscaled_covariance.push(covariance[(i, j)]);
            }
        }

        Ok(Self {
            coefficients: beta.iter().copied().collect(),
            unscaled_covariance,
            residual_variance: rss / df_residual as f64,
            df_residual,
            n_obs: m,
            r_squared,
            adjusted_r_squared,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn n_coefficients(&self) -> usize {
        self.coefficients.len()
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// `1 - (1 - R²)(n - 1)/(n - p)`, intercept counted in `p`
    pub fn adjusted_r_squared(&self) -> f64 {
        self.adjusted_r_squared
    }

    /// Residual variance estimate `s² = RSS / (n - p)`
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    pub fn df_residual(&self) -> usize {
        self.df_residual
    }

    /// Number of rows the model was fitted on
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Point predictions for every row of `design`
    pub fn fitted(&self, design: &DMatrix<f64>) -> Result<Vec<f64>> {
        self.check_columns(design)?;
        Ok(design
            .row_iter()
            .map(|row| row.iter().zip(&self.coefficients).map(|(x, b)| x * b).sum())
            .collect())
    }

    /// Point predictions with `level` prediction intervals for every row of `design`
    pub fn predict(&self, design: &DMatrix<f64>, level: f64) -> Result<Vec<PredictionInterval>> {
        self.check_columns(design)?;
        if !(level > 0.0 && level < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "prediction level must be in (0, 1), got {level}"
            )));
        }

        let t_dist = StudentsT::new(0.0, 1.0, self.df_residual as f64).map_err(|e| {
            Error::Computation(format!("Failed to create t-distribution: {}", e))
        })?;
        let critical_value = t_dist.inverse_cdf((1.0 + level) / 2.0);

        let p = self.coefficients.len();
        let intervals = design
            .row_iter()
            .map(|row| {
                let x0: Vec<f64> = row.iter().copied().collect();
                let fit: f64 = x0.iter().zip(&self.coefficients).map(|(x, b)| x * b).sum();
                let leverage = quadratic_form(&self.unscaled_covariance, &x0, p);
                let se = (self.residual_variance * (1.0 + leverage)).sqrt();
                PredictionInterval {
                    fit,
                    lower: fit - critical_value * se,
                    upper: fit + critical_value * se,
                }
            })
            .collect();
        Ok(intervals)
    }

    fn check_columns(&self, design: &DMatrix<f64>) -> Result<()> {
        if design.ncols() != self.coefficients.len() {
            return Err(Error::size_mismatch(
                self.coefficients.len(),
                design.ncols(),
                "design columns",
            ));
        }
        Ok(())
    }
}

/// x₀ᵀ C x₀ for a row-major p × p matrix C
fn quadratic_form(matrix: &[f64], x: &[f64], p: usize) -> f64 {
    let mut total = 0.0;
    for i in 0..p {
        let row = &matrix[i * p..(i + 1) * p];
        let inner: f64 = row.iter().zip(x).map(|(c, xj)| c * xj).sum();
        total += x[i] * inner;
    }
    total
}
