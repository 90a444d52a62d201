use crate::error::ConfigError;
use core_types::{DominanceRule, InstrumentId};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; omitted sections fall back to their
/// `Default` implementation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basket: Basket,
    pub solver: SolverConfig,
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

/// The ordered list of instruments to analyze.
///
/// This order becomes the row/column order of every matrix in the report.
#[derive(Debug, Clone, Deserialize)]
pub struct Basket {
    pub instruments: Vec<InstrumentId>,
}

/// Iteration limits for the Jacobi eigensolver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of pivot rotations before returning a best-effort result.
    pub max_sweeps: usize,
    /// Convergence threshold on the largest off-diagonal magnitude.
    pub tolerance: f64,
}

/// Parameters for interpreting the decomposition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How the main trend instrument is picked from the leading eigenvector.
    pub dominance: DominanceRule,
}

/// How the CLI renders the analysis.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: OutputFormat,
    /// Also print the correlation matrix.
    pub show_correlation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Logging destination and default verbosity. `RUST_LOG` overrides `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, logs go to a daily rolling file in this directory instead of stderr.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// These allow a user to omit any section from their toml and still have it
// work with sensible defaults.

impl Default for Basket {
    fn default() -> Self {
        Self {
            instruments: ["RELIANCE.NS", "TCS.NS", "INFY.NS", "HDFCBANK.NS", "ITC.NS"]
                .into_iter()
                .map(InstrumentId::from)
                .collect(),
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_sweeps: 50,
            tolerance: 1e-10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "eigentrend.log".to_string(),
        }
    }
}

impl Config {
    /// Checks invariants that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.basket.instruments.is_empty() {
            return Err(ConfigError::ValidationError(
                "basket.instruments must list at least one instrument".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for instrument in &self.basket.instruments {
            if !seen.insert(instrument) {
                return Err(ConfigError::ValidationError(format!(
                    "basket.instruments lists {} more than once",
                    instrument
                )));
            }
        }

        if self.solver.max_sweeps == 0 {
            return Err(ConfigError::ValidationError(
                "solver.max_sweeps must be at least 1".to_string(),
            ));
        }
        if !self.solver.tolerance.is_finite() || self.solver.tolerance <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "solver.tolerance must be a positive number, got {}",
                self.solver.tolerance
            )));
        }

        Ok(())
    }
}
