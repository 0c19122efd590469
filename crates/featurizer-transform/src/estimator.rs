//! Training lifecycle shared by featurizer estimators.
//!
//! An estimator moves through four states:
//!
//! ```text
//! Pending --begin_training--> Training --on_data_completed--> Finished
//!                                 |                               |
//!                                 +------complete_training--------+--> Completed
//! ```
//!
//! `fit` is only accepted in `Training`. A `FitResult::Complete` answer moves
//! the estimator to `Finished` on its own. A transformer can only be created
//! once training is `Completed`.

use std::fmt;
use std::marker::PhantomData;

use featurizer_core::ValueTraits;
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::pivot::PivotTransformer;

/// Where an estimator is in its training pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrainingState {
    #[default]
    Pending,
    Training,
    Finished,
    Completed,
}

impl fmt::Display for TrainingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Training => "Training",
            Self::Finished => "Finished",
            Self::Completed => "Completed",
        };
        f.write_str(name)
    }
}

/// Estimator's answer to one `fit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitResult {
    /// No more data is needed.
    Complete,
    /// Keep feeding data.
    Continue,
    /// Replay the data from the start.
    ResetAndContinue,
}

/// Online training pass that yields a transformer.
pub trait Estimator {
    /// One training item.
    type Input;
    /// Transformer produced once training completes.
    type Transformer;

    fn get_state(&self) -> TrainingState;

    /// `Pending` to `Training`.
    fn begin_training(&mut self) -> Result<()>;

    /// Feed a batch of training items.
    fn fit(&mut self, input: &[Self::Input]) -> Result<FitResult>;

    /// Signal the end of one pass over the data.
    fn on_data_completed(&mut self) -> Result<()>;

    /// Finalize training. Accepted from `Training` or `Finished`.
    fn complete_training(&mut self) -> Result<()>;

    /// Build the transformer. Only valid in `Completed`.
    fn create_transformer(&self) -> Result<Self::Transformer>;

    /// True once no more data will be accepted.
    fn is_training_complete(&self) -> bool {
        !matches!(
            self.get_state(),
            TrainingState::Pending | TrainingState::Training
        )
    }
}

fn expect_state(expected: TrainingState, actual: TrainingState) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(TransformError::InvalidState { expected, actual })
    }
}

/// Estimator for [`PivotTransformer`]. The pivot learns nothing, so the first
/// `fit` call completes training.
pub struct PivotEstimator<T> {
    state: TrainingState,
    _value: PhantomData<fn() -> T>,
}

impl<T> PivotEstimator<T> {
    pub fn new() -> Self {
        Self {
            state: TrainingState::Pending,
            _value: PhantomData,
        }
    }

    fn transition(&mut self, to: TrainingState) {
        debug!(from = %self.state, to = %to, "pivot estimator state change");
        self.state = to;
    }
}

impl<T> Default for PivotEstimator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PivotEstimator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PivotEstimator")
            .field("state", &self.state)
            .finish()
    }
}

impl<T: ValueTraits> Estimator for PivotEstimator<T> {
    type Input = T::Nullable;
    type Transformer = PivotTransformer<T>;

    fn get_state(&self) -> TrainingState {
        self.state
    }

    fn begin_training(&mut self) -> Result<()> {
        expect_state(TrainingState::Pending, self.state)?;
        self.transition(TrainingState::Training);
        Ok(())
    }

    fn fit(&mut self, _input: &[Self::Input]) -> Result<FitResult> {
        expect_state(TrainingState::Training, self.state)?;
        self.transition(TrainingState::Finished);
        Ok(FitResult::Complete)
    }

    fn on_data_completed(&mut self) -> Result<()> {
        expect_state(TrainingState::Training, self.state)?;
        self.transition(TrainingState::Finished);
        Ok(())
    }

    fn complete_training(&mut self) -> Result<()> {
        if self.state != TrainingState::Training {
            expect_state(TrainingState::Finished, self.state)?;
        }
        self.transition(TrainingState::Completed);
        Ok(())
    }

    fn create_transformer(&self) -> Result<Self::Transformer> {
        expect_state(TrainingState::Completed, self.state)?;
        Ok(PivotTransformer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut estimator = PivotEstimator::<f64>::new();
        assert_eq!(estimator.get_state(), TrainingState::Pending);
        assert!(!estimator.is_training_complete());

        estimator.begin_training().unwrap();
        assert_eq!(estimator.get_state(), TrainingState::Training);

        assert_eq!(estimator.fit(&[1.0, 2.0]).unwrap(), FitResult::Complete);
        assert_eq!(estimator.get_state(), TrainingState::Finished);
        assert!(estimator.is_training_complete());

        estimator.complete_training().unwrap();
        assert_eq!(estimator.get_state(), TrainingState::Completed);
        assert_eq!(estimator.create_transformer().unwrap(), PivotTransformer::default());
    }

    #[test]
    fn test_complete_without_fit() {
        let mut estimator = PivotEstimator::<String>::new();
        estimator.begin_training().unwrap();
        estimator.on_data_completed().unwrap();
        estimator.complete_training().unwrap();
        assert!(estimator.create_transformer().is_ok());
    }

    #[test]
    fn test_complete_directly_from_training() {
        let mut estimator = PivotEstimator::<i32>::new();
        estimator.begin_training().unwrap();
        estimator.complete_training().unwrap();
        assert_eq!(estimator.get_state(), TrainingState::Completed);
    }

    #[test]
    fn test_fit_before_begin_is_rejected() {
        let mut estimator = PivotEstimator::<f64>::new();
        assert_eq!(
            estimator.fit(&[]).unwrap_err(),
            TransformError::InvalidState {
                expected: TrainingState::Training,
                actual: TrainingState::Pending,
            }
        );
    }

    #[test]
    fn test_transformer_requires_completed() {
        let mut estimator = PivotEstimator::<f64>::new();
        estimator.begin_training().unwrap();
        let err = estimator.create_transformer().unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidState {
                expected: TrainingState::Completed,
                actual: TrainingState::Training,
            }
        );
    }

    #[test]
    fn test_begin_twice_is_rejected() {
        let mut estimator = PivotEstimator::<f64>::new();
        estimator.begin_training().unwrap();
        assert!(estimator.begin_training().is_err());
    }

    #[test]
    fn test_complete_from_pending_is_rejected() {
        let mut estimator = PivotEstimator::<f64>::new();
        assert!(matches!(
            estimator.complete_training(),
            Err(TransformError::InvalidState {
                actual: TrainingState::Pending,
                ..
            })
        ));
    }
}
