//! Configuration types for DataFrame detection

use aberration_detection::{CusumParameters, EwmaParameters, SerflingParameters};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// How a column is picked out of a DataFrame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSelector {
    /// Column name
    Name(String),
    /// Zero-based column position
    Position(usize),
}

impl ColumnSelector {
    pub(crate) fn select<'a>(&self, df: &'a DataFrame) -> Result<&'a Column> {
        match self {
            Self::Name(name) => df
                .column(name)
                .map_err(|_| Error::InvalidColumn(name.clone())),
            Self::Position(i) => df.get_columns().get(*i).ok_or_else(|| {
                Error::InvalidColumn(format!("position {i} (frame has {} columns)", df.width()))
            }),
        }
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for ColumnSelector {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Position(i) => write!(f, "#{i}"),
        }
    }
}

/// Outbreak detection methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SurveillanceMethod {
    /// Modified CUSUM (C1′, C2′, C3′)
    ModifiedCusum(CusumParameters),

    /// Exponentially weighted moving average
    Ewma(EwmaParameters),

    /// Adjusted Serfling regression, fitted on the frame itself
    Serfling(SerflingParameters),
}

impl SurveillanceMethod {
    /// Get the name of this method
    pub fn name(&self) -> &'static str {
        match self {
            Self::ModifiedCusum(_) => "modified_cusum",
            Self::Ewma(_) => "ewma",
            Self::Serfling(_) => "serfling",
        }
    }
}

impl Default for SurveillanceMethod {
    fn default() -> Self {
        Self::ModifiedCusum(CusumParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_json() {
        let method: SurveillanceMethod =
            serde_json::from_str(r#"{"method": "ewma", "lambda": 0.3, "k": 2.0, "move_t": 8, "ignore_t": 1}"#)
                .unwrap();
        assert_eq!(
            method,
            SurveillanceMethod::Ewma(EwmaParameters {
                lambda: 0.3,
                k: 2.0,
                move_t: 8,
                ignore_t: 1,
            })
        );
        assert_eq!(method.name(), "ewma");
    }

    #[test]
    fn test_method_round_trip() {
        let method = SurveillanceMethod::Serfling(SerflingParameters {
            cycles: vec![52, 26],
            ..Default::default()
        });
        let json = serde_json::to_string(&method).unwrap();
        assert!(json.contains(r#""method":"serfling""#));
        let back: SurveillanceMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, method);
    }

    #[test]
    fn test_selector_from_json() {
        let by_name: ColumnSelector = serde_json::from_str(r#""cases""#).unwrap();
        assert_eq!(by_name, ColumnSelector::from("cases"));
        let by_position: ColumnSelector = serde_json::from_str("2").unwrap();
        assert_eq!(by_position, ColumnSelector::from(2));
    }

    #[test]
    fn test_select() {
        let df = df!("week" => [1i64, 2], "cases" => [3.0, 4.0]).unwrap();
        assert_eq!(ColumnSelector::from(1).select(&df).unwrap().name().as_str(), "cases");
        assert!(matches!(
            ColumnSelector::from("deaths").select(&df),
            Err(Error::InvalidColumn(_))
        ));
        assert!(matches!(
            ColumnSelector::from(5).select(&df),
            Err(Error::InvalidColumn(_))
        ));
    }
}
