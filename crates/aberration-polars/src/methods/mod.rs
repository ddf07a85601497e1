//! DataFrame conversion and the `DetectionFrame` implementation

mod cusum;
mod ewma;
mod serfling;

use aberration_core::{Baseline, TimeSeries, Timestamp};
use aberration_detection::{CusumParameters, EwmaParameters, SerflingModel, SerflingParameters};
use polars::prelude::*;
use tracing::debug;

use crate::{ColumnSelector, DetectionFrame, Error, Result, SerflingFrame, SurveillanceMethod};

/// Rows of the input that survive missing-value removal, and their series
pub(crate) struct Prepared {
    pub frame: DataFrame,
    pub series: TimeSeries,
}

pub(crate) fn prepare(
    df: &DataFrame,
    value: &ColumnSelector,
    time: Option<&ColumnSelector>,
) -> Result<Prepared> {
    let value_column = value.select(df)?;
    let values = float_values(value_column)?;

    let timestamps = match time {
        Some(selector) => {
            let time_column = selector.select(df)?;
            if time_column.name() == value_column.name() {
                return Err(Error::InvalidParameter(format!(
                    "value and time columns are both {selector}"
                )));
            }
            timestamps(time_column)?
        }
        None => (1..=df.height() as Timestamp).collect(),
    };

    let keep: Vec<bool> = values
        .iter()
        .map(|v| matches!(v, Some(x) if !x.is_nan()))
        .collect();
    let frame = df.filter(&BooleanChunked::from_slice("keep".into(), &keep))?;
    let series = TimeSeries::new(timestamps, values)?;
    debug!(
        rows = df.height(),
        retained = series.len(),
        column = %value,
        "prepared detection input"
    );

    Ok(Prepared { frame, series })
}

fn float_values(column: &Column) -> Result<Vec<Option<f64>>> {
    match column.dtype() {
        DataType::Float64
        | DataType::Float32
        | DataType::Int64
        | DataType::Int32
        | DataType::Int16
        | DataType::Int8
        | DataType::UInt64
        | DataType::UInt32
        | DataType::UInt16
        | DataType::UInt8 => {
            let float_column = column.cast(&DataType::Float64)?;
            Ok(float_column.f64()?.into_iter().collect())
        }
        dt => Err(Error::TypeMismatch {
            expected: "numeric".to_string(),
            got: format!("{:?}", dt),
        }),
    }
}

fn timestamps(column: &Column) -> Result<Vec<Timestamp>> {
    let physical = match column.dtype() {
        DataType::Int64
        | DataType::Int32
        | DataType::Int16
        | DataType::Int8
        | DataType::UInt64
        | DataType::UInt32
        | DataType::UInt16
        | DataType::UInt8 => column.cast(&DataType::Int64)?,
        DataType::Date => column.cast(&DataType::Int32)?.cast(&DataType::Int64)?,
        DataType::Datetime(_, _) => column.cast(&DataType::Int64)?,
        dt => {
            return Err(Error::TypeMismatch {
                expected: "integer, Date or Datetime".to_string(),
                got: format!("{:?}", dt),
            })
        }
    };
    physical
        .i64()?
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::InvalidInput(format!("time column {} contains nulls", column.name())))
}

pub(crate) fn float_column(name: &str, values: &[Option<f64>]) -> Column {
    Series::new(name.into(), values.to_vec()).into()
}

pub(crate) fn warning_column(name: &str, warning: &[Option<bool>]) -> Column {
    let flags: Vec<Option<i32>> = warning.iter().map(|w| w.map(i32::from)).collect();
    Series::new(name.into(), flags).into()
}

/// `{prefix}mean` and `{prefix}sd` columns
pub(crate) fn baseline_columns(prefix: &str, baseline: &[Option<Baseline>]) -> [Column; 2] {
    let mean: Vec<Option<f64>> = baseline.iter().map(|b| b.map(|b| b.mean)).collect();
    let sd: Vec<Option<f64>> = baseline.iter().map(|b| b.map(|b| b.sd)).collect();
    [
        float_column(&format!("{prefix}mean"), &mean),
        float_column(&format!("{prefix}sd"), &sd),
    ]
}

impl DetectionFrame for DataFrame {
    fn modified_cusum(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        params: CusumParameters,
    ) -> Result<DataFrame> {
        cusum::modified_cusum_impl(self, &value.into(), time.as_ref(), params)
    }

    fn ewma_detection(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        params: EwmaParameters,
    ) -> Result<DataFrame> {
        ewma::ewma_impl(self, &value.into(), time.as_ref(), params)
    }

    fn serfling_fit(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        params: SerflingParameters,
    ) -> Result<SerflingFrame> {
        serfling::serfling_fit_impl(self, &value.into(), time.as_ref(), params)
    }

    fn serfling_predict(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        model: &SerflingModel,
    ) -> Result<DataFrame> {
        serfling::serfling_predict_impl(self, &value.into(), time.as_ref(), model)
    }

    fn detect_aberrations(
        &self,
        value: impl Into<ColumnSelector>,
        time: Option<ColumnSelector>,
        method: SurveillanceMethod,
    ) -> Result<DataFrame> {
        match method {
            SurveillanceMethod::ModifiedCusum(params) => self.modified_cusum(value, time, params),
            SurveillanceMethod::Ewma(params) => self.ewma_detection(value, time, params),
            SurveillanceMethod::Serfling(params) => {
                Ok(self.serfling_fit(value, time, params)?.output)
            }
        }
    }
}
