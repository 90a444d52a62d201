use crate::error::PcaError;
use crate::report::{PcaResult, PrincipalComponent};
use core_types::{DominanceRule, InstrumentId};
use eigensolver::EigenDecomposition;
use std::cmp::Ordering;

/// Orders raw eigenpairs into principal components and derives the headline
/// statistics of the analysis.
#[derive(Debug, Clone, Default)]
pub struct PcaInterpreter {
    dominance: DominanceRule,
}

impl PcaInterpreter {
    pub fn new(dominance: DominanceRule) -> Self {
        Self { dominance }
    }

    pub fn dominance(&self) -> DominanceRule {
        self.dominance
    }

    /// Sorts the eigenpairs by descending eigenvalue (ties keep solver order)
    /// and computes variance explained and the main trend instrument.
    ///
    /// `instruments[k]` labels row `k` of the eigenvector matrix.
    pub fn interpret(
        &self,
        instruments: &[InstrumentId],
        decomposition: &EigenDecomposition,
    ) -> Result<PcaResult, PcaError> {
        let n = decomposition.len();
        if n == 0 {
            return Err(PcaError::Interpretation(
                "decomposition has no eigenpairs".to_string(),
            ));
        }
        if instruments.len() != n || decomposition.eigenvectors.rows() != n {
            return Err(PcaError::Interpretation(format!(
                "{} instrument label(s) for a {}x{} decomposition",
                instruments.len(),
                decomposition.eigenvectors.rows(),
                n
            )));
        }
        if decomposition.eigenvalues.iter().any(|e| !e.is_finite()) {
            return Err(PcaError::DegenerateSample(
                "decomposition produced a non-finite eigenvalue".to_string(),
            ));
        }

        let eigenvalues = &decomposition.eigenvalues;
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(Ordering::Equal)
        });

        let total_variance: f64 = eigenvalues.iter().sum();

        let components: Vec<PrincipalComponent> = order
            .iter()
            .enumerate()
            .map(|(position, &index)| PrincipalComponent {
                rank: position + 1,
                eigenvalue: eigenvalues[index],
                loadings: decomposition.eigenvector(index),
                variance_explained_pct: percentage_of(eigenvalues[index], total_variance),
            })
            .collect();

        let leading = &components[0];
        let main_index = self.dominance.select(&leading.loadings).ok_or_else(|| {
            PcaError::Interpretation("leading eigenvector is empty".to_string())
        })?;
        let variance_explained = leading.variance_explained_pct;
        let main_trend_instrument = instruments[main_index].clone();

        tracing::debug!(
            total_variance,
            variance_explained,
            main_trend = %main_trend_instrument,
            rule = ?self.dominance,
            "Interpreted eigen-decomposition."
        );

        Ok(PcaResult {
            instruments: instruments.to_vec(),
            components,
            total_variance,
            variance_explained,
            main_trend_instrument,
            convergence: decomposition.status,
        })
    }
}

/// `value / total * 100`, clamped to [0, 100]. Zero when `total` is not positive.
fn percentage_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        (value / total * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
