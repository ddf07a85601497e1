//! Tests for edge cases and error handling

mod common;

use aberration_polars::{
    CusumParameters, DetectionFrame, EwmaParameters, Error, SerflingParameters,
};
use common::*;
use polars::prelude::*;

#[test]
fn test_missing_values_are_dropped() {
    let mut cases: Vec<Option<f64>> = OUTBREAK.iter().copied().map(Some).collect();
    cases.insert(3, None);
    cases.insert(8, Some(f64::NAN));
    let weeks: Vec<i64> = (1..=cases.len() as i64).collect();
    let df = df!["week" => weeks, "cases" => cases].unwrap();

    let out = df
        .modified_cusum("cases", Some("week".into()), CusumParameters::default())
        .unwrap();
    assert_eq!(out.height(), 16);
    assert_eq!(flagged(&extract_warnings(&out, "C1_prime_warning")), vec![10, 11, 12]);

    let weeks: Vec<Option<i64>> = out.column("week").unwrap().i64().unwrap().into_iter().collect();
    assert!(!weeks.contains(&Some(4)));
    assert!(!weeks.contains(&Some(9)));
}

#[test]
fn test_empty_frame() {
    let df = create_test_df(&[]);
    let out = df.ewma_detection("cases", None, EwmaParameters::default()).unwrap();
    assert_eq!(out.height(), 0);
    assert!(out.column("warning").is_ok());
}

#[test]
fn test_short_frame_has_only_nulls() {
    let df = create_test_df(&[1.0, 2.0, 3.0]);
    let out = df
        .modified_cusum("cases", None, CusumParameters::default())
        .unwrap();
    assert!(extract_warnings(&out, "C1_prime_warning")
        .iter()
        .all(Option::is_none));
}

#[test]
fn test_invalid_column_error() {
    let df = create_test_df(&OUTBREAK);
    let result = df.modified_cusum("deaths", None, CusumParameters::default());
    assert!(matches!(result, Err(Error::InvalidColumn(_))));

    let result = df.modified_cusum(7usize, None, CusumParameters::default());
    assert!(matches!(result, Err(Error::InvalidColumn(_))));
}

#[test]
fn test_irregular_time_column() {
    let df = df![
        "week" => [1i64, 2, 4, 5, 6, 7],
        "cases" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
    ]
    .unwrap();
    let result = df.modified_cusum("cases", Some("week".into()), CusumParameters::default());
    assert!(matches!(result, Err(Error::Aberration(_))));
}

#[test]
fn test_null_time_column() {
    let df = df![
        "week" => [Some(1i64), None, Some(3)],
        "cases" => [1.0, 2.0, 3.0]
    ]
    .unwrap();
    let result = df.ewma_detection("cases", Some("week".into()), EwmaParameters::default());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_serfling_needs_more_rows_than_coefficients() {
    let df = create_test_df(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let result = df.serfling_fit("cases", None, SerflingParameters::default());
    assert!(matches!(result, Err(Error::Aberration(_))));
}
