use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Matrix is not symmetric at ({row}, {col})")]
    NotSymmetric { row: usize, col: usize },

    #[error("Matrix contains a non-finite value at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    #[error("Invalid solver settings: {0}")]
    InvalidSettings(String),
}
