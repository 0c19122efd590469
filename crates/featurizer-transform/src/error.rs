//! Error types for matrix views, transformers and estimators.

use thiserror::Error;

use featurizer_core::FeaturizerError;

use crate::estimator::TrainingState;

/// Errors raised while shaping input, pivoting, or driving an estimator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// `execute` was called with an empty matrix range.
    #[error("no input matrix passed in")]
    NoInputMatrix,

    /// Matrices in one call disagree on their column count.
    #[error(
        "all input matrices must have the same number of columns (expected {expected}, found {found} at index {index})"
    )]
    MismatchedColumns {
        expected: usize,
        found: usize,
        index: usize,
    },

    /// Backing storage cannot hold the declared matrix shape.
    #[error("invalid matrix shape: {message}")]
    InvalidShape { message: String },

    /// Lifecycle method called out of order.
    #[error("invalid training state: expected {expected}, found {actual}")]
    InvalidState {
        expected: TrainingState,
        actual: TrainingState,
    },

    /// Archive or value access failure.
    #[error(transparent)]
    Core(#[from] FeaturizerError),
}

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

impl TransformError {
    /// Create an InvalidShape error.
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape {
            message: message.into(),
        }
    }

    /// True for errors caused by unusable caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NoInputMatrix
                | Self::MismatchedColumns { .. }
                | Self::InvalidShape { .. }
                | Self::Core(FeaturizerError::InvalidInput { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_distinct() {
        let empty = TransformError::NoInputMatrix;
        let mismatched = TransformError::MismatchedColumns {
            expected: 4,
            found: 3,
            index: 1,
        };

        assert!(empty.is_invalid_input());
        assert!(mismatched.is_invalid_input());
        assert_ne!(empty.to_string(), mismatched.to_string());
        assert!(mismatched.to_string().contains("expected 4, found 3 at index 1"));
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: TransformError = FeaturizerError::UnsupportedVersion {
            major: 2,
            minor: 0,
            supported_major: 1,
        }
        .into();

        assert!(!err.is_invalid_input());
        assert!(err.to_string().starts_with("Unsupported archive version: 2.0"));
    }

    #[test]
    fn test_invalid_state_names_both_states() {
        let err = TransformError::InvalidState {
            expected: TrainingState::Completed,
            actual: TrainingState::Training,
        };
        assert_eq!(
            err.to_string(),
            "invalid training state: expected Completed, found Training"
        );
    }
}
