//! Serfling regression basis

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Trend plus harmonic terms for a set of cycle lengths
///
/// Columns are `[1, t, t², sin(2πt/c₁), cos(2πt/c₁), sin(2πt/c₂), …]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerflingBasis {
    cycles: Vec<u32>,
}

impl SerflingBasis {
    pub fn new(cycles: &[u32]) -> Self {
        Self {
            cycles: cycles.to_vec(),
        }
    }

    pub fn cycles(&self) -> &[u32] {
        &self.cycles
    }

    /// Number of regression coefficients, intercept included
    pub fn n_columns(&self) -> usize {
        3 + 2 * self.cycles.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec!["intercept".to_string(), "t".to_string(), "t2".to_string()];
        for cycle in &self.cycles {
            names.push(format!("sin_{cycle}"));
            names.push(format!("cos_{cycle}"));
        }
        names
    }

    /// Basis terms at a single time index
    pub fn row(&self, t: usize) -> Vec<f64> {
        let t = t as f64;
        let mut row = Vec::with_capacity(self.n_columns());
        row.extend([1.0, t, t * t]);
        for &cycle in &self.cycles {
            let angle = 2.0 * PI * t / f64::from(cycle);
            row.push(angle.sin());
            row.push(angle.cos());
        }
        row
    }

    /// Design matrix for `len` consecutive indices starting at `start`
    pub fn design(&self, start: usize, len: usize) -> DMatrix<f64> {
        let p = self.n_columns();
        let mut design = DMatrix::zeros(len, p);
        for i in 0..len {
            for (j, value) in self.row(start + i).into_iter().enumerate() {
                design[(i, j)] = value;
            }
        }
        design
    }
}
