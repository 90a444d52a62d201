use covariance::CovarianceError;
use eigensolver::SolverError;
use returns::ReturnsError;
use thiserror::Error;

/// Failures surfaced at the boundary of the PCA pipeline.
///
/// Reaching the solver's sweep cap is deliberately absent: it degrades the
/// result and is reported through `PcaResult::convergence` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PcaError {
    #[error("Insufficient data: {0}")]
    InsufficientData(#[from] ReturnsError),

    #[error("Degenerate sample: {0}")]
    DegenerateSample(String),

    #[error("Eigen decomposition failed: {0}")]
    Solver(SolverError),

    #[error("Failed to interpret decomposition: {0}")]
    Interpretation(String),
}

impl From<CovarianceError> for PcaError {
    fn from(error: CovarianceError) -> Self {
        PcaError::DegenerateSample(error.to_string())
    }
}

impl From<SolverError> for PcaError {
    fn from(error: SolverError) -> Self {
        match error {
            SolverError::NonFinite { .. } => PcaError::DegenerateSample(error.to_string()),
            other => PcaError::Solver(other),
        }
    }
}
