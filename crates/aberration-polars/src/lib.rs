//! Polars integration for outbreak detection
//!
//! This crate runs the detectors of `aberration-detection` over a column of a
//! Polars DataFrame through a single extension trait, returning the input
//! frame augmented with baselines, thresholds, margins and 0/1 warnings.
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use aberration_polars::{CusumParameters, DetectionFrame};
//!
//! let df = df![
//!     "week" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16],
//!     "cases" => [10.0, 9.0, 11.0, 10.0, 9.0, 12.0, 10.0, 11.0, 10.0, 9.0, 15.0, 18.0, 21.0, 15.0, 10.0, 5.0]
//! ]
//! .unwrap();
//!
//! let annotated = df
//!     .modified_cusum("cases", Some("week".into()), CusumParameters::default())
//!     .unwrap();
//! let warnings = annotated.column("C1_prime_warning").unwrap().i32().unwrap();
//! assert_eq!(warnings.get(11), Some(1));
//! ```

mod config;
mod error;
mod methods;
mod traits;

pub use config::*;
pub use error::{Error, Result};
pub use traits::*;

// Re-export the parameter and model types used by the trait
pub use aberration_detection::{
    CusumParameters, EwmaParameters, SerflingModel, SerflingParameters,
};
