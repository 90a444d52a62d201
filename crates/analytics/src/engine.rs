use crate::error::PcaError;
use crate::interpreter::PcaInterpreter;
use crate::report::{InstrumentReturn, PcaReport, PcaResult};
use core_types::{DominanceRule, LabeledMatrix, PriceSeries};
use covariance::{CovarianceMatrixBuilder, correlation_from_covariance};
use eigensolver::{JacobiEigensolver, SolverSettings};
use returns::{DateWindow, ReturnSeriesBuilder};

/// A stateless pipeline from aligned price series to a `PcaReport`.
///
/// The engine holds only configuration, so a single instance can serve
/// concurrent requests; every call builds its own matrices.
#[derive(Debug, Clone, Default)]
pub struct PcaEngine {
    returns: ReturnSeriesBuilder,
    covariance: CovarianceMatrixBuilder,
    solver: JacobiEigensolver,
    interpreter: PcaInterpreter,
}

impl PcaEngine {
    pub fn new(settings: SolverSettings, dominance: DominanceRule) -> Self {
        Self {
            returns: ReturnSeriesBuilder::new(),
            covariance: CovarianceMatrixBuilder::new(),
            solver: JacobiEigensolver::new(settings),
            interpreter: PcaInterpreter::new(dominance),
        }
    }

    /// Restricts every analysis to the given trading-date window.
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.returns = self.returns.with_window(window);
        self
    }

    /// The main entry point for running an analysis.
    ///
    /// # Arguments
    ///
    /// * `prices` - One series per instrument, all sharing the same ordered dates.
    ///   The slice order fixes the row/column order of every output matrix.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `PcaReport` or a `PcaError`. Hitting the solver's
    /// sweep cap is not an error; inspect `report.result.convergence`.
    pub fn run(&self, prices: &[PriceSeries]) -> Result<PcaReport, PcaError> {
        tracing::info!(instruments = prices.len(), "Starting PCA analysis.");

        let table = self.returns.build(prices)?;
        let covariance = self.covariance.build(&table)?;
        let correlation = correlation_from_covariance(&covariance)?;
        let result = self.decompose(&covariance)?;

        let cumulative_returns = table
            .series
            .iter()
            .map(|s| InstrumentReturn {
                instrument: s.instrument.clone(),
                cumulative_return: s.cumulative_return(),
            })
            .collect();

        tracing::info!(
            main_trend = %result.main_trend_instrument,
            variance_explained = result.variance_explained,
            total_variance = result.total_variance,
            converged = result.convergence.is_converged(),
            "PCA analysis complete."
        );

        Ok(PcaReport {
            result,
            covariance,
            correlation,
            trading_days: table.periods() + 1,
            cumulative_returns,
        })
    }

    /// Decomposes an already-built covariance matrix.
    pub fn decompose(&self, covariance: &LabeledMatrix) -> Result<PcaResult, PcaError> {
        let decomposition = self.solver.solve(covariance.matrix())?;
        self.interpreter.interpret(covariance.labels(), &decomposition)
    }
}
