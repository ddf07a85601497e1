//! Early outbreak detection for epidemiological time series
//!
//! Re-exports the workspace crates under one roof:
//!
//! - [`aberration_core`]: time series and rolling baselines
//! - [`aberration_regression`]: least squares with prediction intervals
//! - [`aberration_detection`]: modified CUSUM, EWMA and adjusted Serfling detectors
//! - `aberration_polars` (feature `polars`): the same detectors on DataFrame columns
//!
//! ```rust
//! use aberration::prelude::*;
//!
//! let series = TimeSeries::from_values(vec![
//!     10.0, 9.0, 11.0, 10.0, 9.0, 12.0, 10.0, 11.0, 10.0, 9.0, 15.0, 18.0, 21.0, 15.0, 10.0, 5.0,
//! ])
//! .unwrap();
//!
//! let ewma = EwmaDetector::new(EwmaParameters::default()).unwrap();
//! assert_eq!(ewma.detect(&series).unwrap().alarm_indices(), vec![11, 12, 13]);
//! ```

pub use aberration_core;
pub use aberration_detection;
pub use aberration_regression;

#[cfg(feature = "polars")]
pub use aberration_polars;

pub use aberration_core::{Error, Result, TimeSeries};

pub mod prelude {
    pub use aberration_core::prelude::*;
    pub use aberration_detection::{
        AberrationDetector, AdjustedSerfling, Alarm, ConfigurableDetector, CusumParameters,
        CusumResult, DetectorProperties, EwmaDetector, EwmaParameters, EwmaResult,
        ModifiedCusum, SerflingModel, SerflingOutput, SerflingParameters, Termination, Variant,
    };

    #[cfg(feature = "polars")]
    pub use aberration_polars::{ColumnSelector, DetectionFrame, SurveillanceMethod};
}
