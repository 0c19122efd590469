//! Featurizer transformations over matrices of nullable values.
//!
//! This crate provides:
//!
//! - **matrix**: borrowed row-major matrix views with optional row stride
//! - **pivot**: the forecast-horizon pivot transformer
//! - **estimator**: the training lifecycle and the pivot estimator

mod error;
pub mod estimator;
pub mod matrix;
pub mod pivot;

pub use error::{Result, TransformError};
pub use estimator::{Estimator, FitResult, PivotEstimator, TrainingState};
pub use matrix::Matrix;
pub use pivot::{PivotTransformer, PivotValue};
