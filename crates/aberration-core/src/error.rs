//! Error types for outbreak detection
//!
//! Provides a unified error type for all aberration crates.

use thiserror::Error;

/// Core error type for surveillance operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a detector or estimator
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data (shape, ordering, spacing)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// A continuation series does not start where the training series ended
    #[error("Discontinuous series: expected timestamp {expected}, got {actual}")]
    Discontinuity { expected: i64, actual: i64 },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for infinite values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains infinite values"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("lambda must be in (0, 1]".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: lambda must be in (0, 1]");

        let err = Error::InvalidInput("timestamps are not increasing".to_string());
        assert_eq!(err.to_string(), "Invalid input: timestamps are not increasing");

        let err = Error::InsufficientData { expected: 10, actual: 5 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 10 observations, got 5"
        );

        let err = Error::Computation("rank deficient".to_string());
        assert_eq!(err.to_string(), "Computation error: rank deficient");

        let err = Error::Discontinuity { expected: 105, actual: 110 };
        assert_eq!(
            err.to_string(),
            "Discontinuous series: expected timestamp 105, got 110"
        );
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::size_mismatch(100, 50, "timestamps");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in timestamps: expected 100, got 50"
        );

        let err = Error::non_finite("observations");
        assert_eq!(
            err.to_string(),
            "Computation error: observations contains infinite values"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        match err {
            Error::Other(_) => assert!(err.to_string().contains("custom error message")),
            _ => panic!("Wrong error type"),
        }
    }
}
