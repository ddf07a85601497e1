//! Modified CUSUM on DataFrames

use aberration_detection::{AberrationDetector, CusumParameters, ModifiedCusum, Variant};
use polars::prelude::*;

use super::{baseline_columns, float_column, prepare, warning_column};
use crate::{ColumnSelector, Result};

pub(crate) fn modified_cusum_impl(
    df: &DataFrame,
    value: &ColumnSelector,
    time: Option<&ColumnSelector>,
    params: CusumParameters,
) -> Result<DataFrame> {
    let detector = ModifiedCusum::new(params)?;
    let prepared = prepare(df, value, time)?;
    let result = detector.detect(&prepared.series)?;

    let mut columns: Vec<Column> = Vec::with_capacity(5 + 3 * Variant::ALL.len());
    columns.extend(baseline_columns("baseline_", result.baseline()));
    columns.extend(baseline_columns("lagged_", result.lagged_baseline()));
    columns.push(float_column("threshold", result.threshold()));

    for variant in Variant::ALL {
        let name = variant.column_prefix();
        let track = result.track(variant);
        columns.push(float_column(name, track.statistic()));
        columns.push(float_column(&format!("{name}_margin"), track.margin()));
        columns.push(warning_column(&format!("{name}_warning"), track.warning()));
    }

    Ok(prepared.frame.hstack(&columns)?)
}
