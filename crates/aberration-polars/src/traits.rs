//! Extension trait for outbreak detection on Polars DataFrames

use aberration_detection::{CusumParameters, EwmaParameters, SerflingModel, SerflingParameters};
use polars::prelude::*;

use crate::{ColumnSelector, Result, SurveillanceMethod};

/// Training frame annotated by a fitted Serfling model, plus the model itself
#[derive(Debug, Clone)]
pub struct SerflingFrame {
    pub output: DataFrame,
    pub model: SerflingModel,
}

/// Extension trait for outbreak detection on Polars DataFrames
///
/// Every method reads one value column and an optional time column. Rows
/// whose value is null or NaN are dropped; the returned frame keeps all the
/// remaining input columns and appends the detector's columns. Undefined
/// entries are nulls and warnings are `Int32` 0/1.
///
/// Without a time column the rows are indexed `1..=n` in frame order. A time
/// column must be strictly increasing and equally spaced; integer, `Date` and
/// `Datetime` columns are accepted.
pub trait DetectionFrame {
    /// Modified CUSUM
    ///
    /// # Returns
    /// The input with `baseline_mean`, `baseline_sd`, `lagged_mean`,
    /// `lagged_sd`, `threshold` and, for each of `C1_prime`, `C2_prime` and
    /// `C3_prime`, the statistic plus `{variant}_margin` and `{variant}_warning`
    fn modified_cusum(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        params: CusumParameters,
    ) -> Result<DataFrame>;

    /// EWMA detection
    ///
    /// # Returns
    /// The input with `ewma`, `baseline_mean`, `baseline_sd`, `ucl`, `margin`
    /// and `warning`
    fn ewma_detection(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        params: EwmaParameters,
    ) -> Result<DataFrame>;

    /// Fit an adjusted Serfling model on this frame
    ///
    /// # Returns
    /// The input with `fit`, `lwr`, `upr`, `margin` and `warning`, together
    /// with the fitted model
    fn serfling_fit(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        params: SerflingParameters,
    ) -> Result<SerflingFrame>;

    /// Project a fitted Serfling model onto this frame
    ///
    /// The frame must directly follow the model's training data; this is not
    /// checked (see [`SerflingModel::check_continuation`]).
    fn serfling_predict(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        model: &SerflingModel,
    ) -> Result<DataFrame>;

    /// Run any detector, returning only the annotated frame
    fn detect_aberrations(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        method: SurveillanceMethod,
    ) -> Result<DataFrame>;
}
