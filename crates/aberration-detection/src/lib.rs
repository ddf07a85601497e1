//! Outbreak detection algorithms for surveillance time series
//!
//! This crate provides detectors that flag anomalous counts against baselines
//! estimated from the series itself.
//!
//! # Algorithms
//!
//! ## Control charts
//! - **Modified CUSUM**: three correlated cumulative sums (C1′, C2′, C3′)
//!   against a rolling baseline, the C2′ baseline lagged to resist
//!   contamination by an ongoing outbreak
//! - **EWMA**: exponentially smoothed counts against a lagged control limit
//!
//! ## Regression
//! - **Adjusted Serfling**: seasonal regression refitted with epidemic points
//!   excluded until the adjusted R² stops improving
//!   - Fitted models can be projected onto following periods
//!
//! ## Usage
//!
//! ```rust
//! use aberration_detection::{AberrationDetector, CusumParameters, ModifiedCusum, Variant};
//! use aberration_core::TimeSeries;
//!
//! let counts = vec![
//!     10.0, 9.0, 11.0, 10.0, 9.0, 12.0, 10.0, 11.0, 10.0, 9.0, 15.0, 18.0, 21.0, 15.0, 10.0, 5.0,
//! ];
//! let series = TimeSeries::from_values(counts).unwrap();
//!
//! let detector = ModifiedCusum::new(CusumParameters::default()).unwrap();
//! let result = detector.detect(&series).unwrap();
//!
//! assert_eq!(result.alarm_indices(Variant::C1), vec![10, 11, 12]);
//! ```

pub mod cusum;
pub mod ewma;
pub mod kernel;
pub mod serfling;
pub mod traits;
pub mod types;

pub use cusum::{CusumParameters, CusumResult, CusumTrack, ModifiedCusum, Variant};
pub use ewma::{EwmaDetector, EwmaParameters, EwmaResult};
pub use serfling::{
    AdjustedSerfling, Convergence, IterationRecord, SerflingBasis, SerflingModel,
    SerflingOutput, SerflingParameters, Termination,
};

// Core traits
pub use traits::{AberrationDetector, ConfigurableDetector, DetectorProperties};

pub use kernel::{CusumKernel, EwmaKernel};

pub use types::{Alarm, Exceedance};
