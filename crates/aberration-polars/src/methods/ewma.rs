//! EWMA detection on DataFrames

use aberration_detection::{AberrationDetector, EwmaDetector, EwmaParameters};
use polars::prelude::*;

use super::{baseline_columns, float_column, prepare, warning_column};
use crate::{ColumnSelector, Result};

pub(crate) fn ewma_impl(
    df: &DataFrame,
    value: &ColumnSelector,
    time: Option<&ColumnSelector>,
    params: EwmaParameters,
) -> Result<DataFrame> {
    let detector = EwmaDetector::new(params)?;
    let prepared = prepare(df, value, time)?;
    let result = detector.detect(&prepared.series)?;

    let [mean, sd] = baseline_columns("baseline_", result.baseline());
    let columns: [Column; 6] = [
        Series::new("ewma".into(), result.smoothed().to_vec()).into(),
        mean,
        sd,
        float_column("ucl", result.ucl()),
        float_column("margin", result.margin()),
        warning_column("warning", result.warning()),
    ];

    Ok(prepared.frame.hstack(&columns)?)
}
