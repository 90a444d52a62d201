use core_types::{CoreError, InstrumentId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CovarianceError {
    #[error("Degenerate sample: {observations} return observation(s), at least 2 required")]
    DegenerateSample { observations: usize },

    #[error("No return series were supplied")]
    Empty,

    #[error("Return series of {instrument} has {actual} observations, expected {expected}")]
    LengthMismatch {
        instrument: InstrumentId,
        expected: usize,
        actual: usize,
    },

    #[error("Non-finite covariance between {row} and {col}")]
    NonFinite { row: InstrumentId, col: InstrumentId },

    #[error("Matrix construction failed: {0}")]
    Matrix(#[from] CoreError),
}
