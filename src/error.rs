//! Error types for the fraud-detection helpers

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the library. Every variant is a fail-fast precondition
/// or load failure; nothing here is retried.
#[derive(Debug, Error)]
pub enum FraudUtilsError {
    /// Input file missing or malformed
    #[error("failed to load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    /// Sampling requested before `Datasets::init` succeeded
    #[error("datasets have not been loaded")]
    DatasetsNotLoaded,

    /// Sampling from a table with no rows
    #[error("cannot sample from empty table '{0}'")]
    EmptyTable(&'static str),

    #[error("input sequences must be non-empty")]
    EmptyInput,

    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Label outside {0, 1}
    #[error("label {value} at index {index} is not binary")]
    NonBinaryLabel { index: usize, value: u8 },

    #[error("probability {value} at index {index} is outside [0, 1]")]
    ProbabilityOutOfRange { index: usize, value: f64 },

    /// NaN or infinite ranking score
    #[error("score {value} at index {index} is not finite")]
    NonFiniteScore { index: usize, value: f64 },

    #[error("undefined AUC: single-class input")]
    UndefinedAuc,

    #[error("test fraction {0} must be in (0, 1)")]
    InvalidTestFraction(f64),

    #[error("insufficient samples for stratification: {0}")]
    InsufficientStratification(String),

    #[error("matrix must be square and non-empty, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },

    #[error("expected {expected} class names, got {actual}")]
    ClassNameMismatch { expected: usize, actual: usize },

    #[error("invalid wait range [{min}, {max}]")]
    InvalidWaitRange { min: f64, max: f64 },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FraudUtilsError>;

/// Check that two paired sequences have equal, non-zero length.
pub(crate) fn ensure_paired(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(FraudUtilsError::LengthMismatch { left, right });
    }
    if left == 0 {
        return Err(FraudUtilsError::EmptyInput);
    }
    Ok(())
}

/// Check that every label is 0 or 1.
pub(crate) fn ensure_binary(labels: &[u8]) -> Result<()> {
    match labels.iter().enumerate().find(|(_, &v)| v > 1) {
        Some((index, &value)) => Err(FraudUtilsError::NonBinaryLabel { index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_paired() {
        assert!(ensure_paired(3, 3).is_ok());
        assert!(matches!(
            ensure_paired(3, 2),
            Err(FraudUtilsError::LengthMismatch { left: 3, right: 2 })
        ));
        assert!(matches!(ensure_paired(0, 0), Err(FraudUtilsError::EmptyInput)));
    }

    #[test]
    fn test_ensure_binary() {
        assert!(ensure_binary(&[0, 1, 1, 0]).is_ok());
        assert!(matches!(
            ensure_binary(&[0, 1, 2]),
            Err(FraudUtilsError::NonBinaryLabel { index: 2, value: 2 })
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FraudUtilsError::UndefinedAuc.to_string(),
            "undefined AUC: single-class input"
        );
        assert!(FraudUtilsError::InsufficientStratification("class 1 has 1 member".into())
            .to_string()
            .starts_with("insufficient samples for stratification"));
    }
}
