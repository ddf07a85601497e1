//! Common test utilities for aberration-polars tests
#![allow(dead_code)]

use polars::prelude::*;
use std::f64::consts::PI;

/// Weekly counts with an outbreak at weeks 11-13
pub const OUTBREAK: [f64; 16] = [
    10.0, 9.0, 11.0, 10.0, 9.0, 12.0, 10.0, 11.0, 10.0, 9.0, 15.0, 18.0, 21.0, 15.0, 10.0, 5.0,
];

/// Helper function to create a test DataFrame with a week index
pub fn create_test_df(values: &[f64]) -> DataFrame {
    let weeks: Vec<i64> = (1..=values.len() as i64).collect();
    df!["week" => weeks, "cases" => values].unwrap()
}

/// Noise-free seasonal curve with a small deterministic wiggle
pub fn seasonal_values(start: usize, len: usize) -> Vec<f64> {
    (start..start + len)
        .map(|t| {
            let t = t as f64;
            100.0 + 0.05 * t + 25.0 * (2.0 * PI * t / 52.0).sin() + 2.0 * (1.3 * t).sin()
        })
        .collect()
}

/// Helper function to extract an Int32 warning column
pub fn extract_warnings(df: &DataFrame, name: &str) -> Vec<Option<i32>> {
    df.column(name).unwrap().i32().unwrap().into_iter().collect()
}

/// Helper function to extract a Float64 column
pub fn extract_floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

/// Indices flagged with 1
pub fn flagged(warnings: &[Option<i32>]) -> Vec<usize> {
    warnings
        .iter()
        .enumerate()
        .filter_map(|(i, w)| (*w == Some(1)).then_some(i))
        .collect()
}
