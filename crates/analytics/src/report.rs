use core_types::{InstrumentId, LabeledMatrix, Matrix};
use eigensolver::ConvergenceStatus;
use serde::{Deserialize, Serialize};

/// One principal component: an eigenvalue and its per-instrument loadings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalComponent {
    /// 1-based position in descending eigenvalue order (PC1, PC2, ...).
    pub rank: usize,
    pub eigenvalue: f64,
    /// Eigenvector entries, in the same order as `PcaResult::instruments`.
    pub loadings: Vec<f64>,
    /// Share of total variance carried by this component, in percent.
    pub variance_explained_pct: f64,
}

impl PrincipalComponent {
    pub fn label(&self) -> String {
        format!("PC{}", self.rank)
    }
}

/// The sorted eigen-decomposition of a covariance matrix and its headline statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaResult {
    pub instruments: Vec<InstrumentId>,
    /// Sorted by descending eigenvalue.
    pub components: Vec<PrincipalComponent>,
    /// Sum of all eigenvalues, equal to the covariance trace up to rounding.
    pub total_variance: f64,
    /// Variance explained by the leading component, in percent within [0, 100].
    pub variance_explained: f64,
    /// Instrument selected from the leading eigenvector by the configured rule.
    pub main_trend_instrument: InstrumentId,
    pub convergence: ConvergenceStatus,
}

impl PcaResult {
    pub fn leading(&self) -> Option<&PrincipalComponent> {
        self.components.first()
    }

    pub fn eigenvalues(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.eigenvalue).collect()
    }

    /// Eigenvectors as a matrix with one row per instrument and one column per component.
    pub fn eigenvector_matrix(&self) -> Matrix {
        let n = self.instruments.len();
        let mut m = Matrix::zeros(n, self.components.len());
        for (col, component) in self.components.iter().enumerate() {
            for (row, &loading) in component.loadings.iter().enumerate() {
                m.set(row, col, loading);
            }
        }
        m
    }

    /// Running total of `variance_explained_pct`, component by component.
    pub fn cumulative_variance_explained(&self) -> Vec<f64> {
        self.components
            .iter()
            .scan(0.0, |acc, c| {
                *acc += c.variance_explained_pct;
                Some(*acc)
            })
            .collect()
    }
}

/// Compounded return of one instrument over the analysis window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentReturn {
    pub instrument: InstrumentId,
    pub cumulative_return: f64,
}

/// Everything a single analysis request produces.
///
/// This struct is the final output of the `PcaEngine` and is handed as-is to
/// whatever renders or serializes the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaReport {
    pub result: PcaResult,
    pub covariance: LabeledMatrix,
    pub correlation: LabeledMatrix,
    /// Number of price observations used.
    pub trading_days: usize,
    pub cumulative_returns: Vec<InstrumentReturn>,
}
