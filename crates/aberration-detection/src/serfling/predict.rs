//! Projection of a fitted model onto following periods

use super::basis::SerflingBasis;
use super::model::{SerflingModel, SerflingOutput};
use aberration_core::{Result, TimeSeries};
use tracing::{debug, instrument};

/// Annotate `series` with the model's baseline and prediction interval.
///
/// Time indices continue from `training_len + 1`; nothing is refitted. The
/// caller is responsible for `series` directly following the training data
/// at the same resolution. See [`predict_checked`] for a verified variant.
#[instrument(skip_all, fields(n = series.len(), training_len = model.training_len()))]
pub fn predict(model: &SerflingModel, series: &TimeSeries) -> Result<SerflingOutput> {
    let basis = SerflingBasis::new(model.cycles());
    let design = basis.design(model.training_len() + 1, series.len());
    let intervals = model.best_fit().predict(&design, model.level())?;
    let output = SerflingOutput::from_intervals(series.clone(), &intervals);
    debug!(alarms = output.alarm_count(), "serfling projection");
    Ok(output)
}

/// [`predict`] after checking that `series` continues the training data
pub fn predict_checked(model: &SerflingModel, series: &TimeSeries) -> Result<SerflingOutput> {
    model.check_continuation(series)?;
    predict(model, series)
}
