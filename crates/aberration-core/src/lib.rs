//! Core types for outbreak detection on surveillance time series
//!
//! This crate provides the shared data model used by every detector:
//!
//! - [`TimeSeries`]: an ordered, equally spaced series with missing values removed
//! - [`BaselineWindow`]: named, bounds-checked rolling baseline windows
//! - [`Error`]: the error type shared by all aberration crates
//!
//! # Example
//!
//! ```rust
//! use aberration_core::{BaselineWindow, TimeSeries};
//!
//! let series = TimeSeries::from_values(vec![10.0, 9.0, 11.0, 10.0, 14.0]).unwrap();
//! let window = BaselineWindow::new(4, 0).unwrap();
//!
//! // Index 4 is compared against the four observations before it
//! let baseline = window.estimate(series.values(), 4).unwrap();
//! assert_eq!(baseline.mean, 10.0);
//!
//! // Earlier indices have no baseline at all
//! assert!(window.estimate(series.values(), 3).is_none());
//! ```

pub mod error;
pub mod series;
pub mod utils;
pub mod window;

// Re-export core types
pub use error::{Error, Result};
pub use series::{Observation, TimeSeries, Timestamp};
pub use window::{Baseline, BaselineWindow};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::series::{Observation, TimeSeries, Timestamp};
    pub use crate::window::{Baseline, BaselineWindow};
}
