//! Adjusted Serfling fit and projection on DataFrames

use aberration_detection::{
    AberrationDetector, AdjustedSerfling, SerflingModel, SerflingOutput, SerflingParameters,
};
use polars::prelude::*;

use super::prepare;
use crate::{ColumnSelector, Result, SerflingFrame};

fn output_columns(output: &SerflingOutput) -> [Column; 5] {
    let warning: Vec<i32> = output.warning().iter().map(|&w| i32::from(w)).collect();
    [
        Series::new("fit".into(), output.fit().to_vec()).into(),
        Series::new("lwr".into(), output.lower().to_vec()).into(),
        Series::new("upr".into(), output.upper().to_vec()).into(),
        Series::new("margin".into(), output.margin().to_vec()).into(),
        Series::new("warning".into(), warning).into(),
    ]
}

pub(crate) fn serfling_fit_impl(
    df: &DataFrame,
    value: &ColumnSelector,
    time: Option<&ColumnSelector>,
    params: SerflingParameters,
) -> Result<SerflingFrame> {
    let detector = AdjustedSerfling::new(params)?;
    let prepared = prepare(df, value, time)?;
    let model = detector.detect(&prepared.series)?;
    let output = prepared.frame.hstack(&output_columns(model.output()))?;
    Ok(SerflingFrame { output, model })
}

pub(crate) fn serfling_predict_impl(
    df: &DataFrame,
    value: &ColumnSelector,
    time: Option<&ColumnSelector>,
    model: &SerflingModel,
) -> Result<DataFrame> {
    let prepared = prepare(df, value, time)?;
    let projected = model.predict(&prepared.series)?;
    Ok(prepared.frame.hstack(&output_columns(&projected))?)
}
