//! Least squares regression for surveillance baselines
//!
//! This crate provides the regression capability the Serfling-family
//! detectors build on:
//!
//! - fitting on a subset of rows selected by an immutable [`RowMask`]
//! - adjusted R² for comparing successive fits
//! - point predictions with Student-t prediction intervals for new rows
//!
//! ```rust
//! use aberration_regression::{OlsFit, RowMask};
//! use nalgebra::DMatrix;
//!
//! let design = DMatrix::from_fn(5, 2, |i, j| if j == 0 { 1.0 } else { (i + 1) as f64 });
//! let fit = OlsFit::fit(&design, &[2.0, 4.0, 5.0, 4.0, 5.0], &RowMask::all(5)).unwrap();
//! let interval = fit.predict(&design, 0.95).unwrap();
//! assert!(interval[0].lower < interval[0].upper);
//! ```

pub mod mask;
pub mod ols;

pub use mask::RowMask;
pub use ols::{OlsFit, PredictionInterval};
