use crate::error::CovarianceError;
use core_types::{LabeledMatrix, Matrix, ReturnTable};

/// Standard deviations at or below this are treated as zero when normalizing.
const MIN_STD_DEV: f64 = 1e-12;

/// Builds the unbiased sample covariance matrix of a basket's return series.
#[derive(Debug, Default, Clone, Copy)]
pub struct CovarianceMatrixBuilder;

impl CovarianceMatrixBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Computes `sum((r_i - mean_i) * (r_j - mean_j)) / (len - 1)` for every pair.
    ///
    /// Each off-diagonal entry is computed once and mirrored, so the result is
    /// exactly symmetric.
    pub fn build(&self, table: &ReturnTable) -> Result<LabeledMatrix, CovarianceError> {
        if table.series.is_empty() {
            return Err(CovarianceError::Empty);
        }

        let periods = table.periods();
        for s in &table.series {
            if s.len() != periods {
                return Err(CovarianceError::LengthMismatch {
                    instrument: s.instrument.clone(),
                    expected: periods,
                    actual: s.len(),
                });
            }
        }
        if periods < 2 {
            return Err(CovarianceError::DegenerateSample {
                observations: periods,
            });
        }

        let centered: Vec<Vec<f64>> = table
            .series
            .iter()
            .map(|s| {
                let mean = s.returns.iter().sum::<f64>() / periods as f64;
                s.returns.iter().map(|r| r - mean).collect()
            })
            .collect();

        let n = centered.len();
        let denominator = (periods - 1) as f64;
        let mut matrix = Matrix::zeros(n, n);

        for i in 0..n {
            for j in i..n {
                let value = centered[i]
                    .iter()
                    .zip(&centered[j])
                    .map(|(a, b)| a * b)
                    .sum::<f64>()
                    / denominator;

                if !value.is_finite() {
                    return Err(CovarianceError::NonFinite {
                        row: table.series[i].instrument.clone(),
                        col: table.series[j].instrument.clone(),
                    });
                }
                matrix.set(i, j, value);
                matrix.set(j, i, value);
            }
        }

        tracing::debug!(instruments = n, periods, trace = matrix.trace(), "Built covariance matrix.");

        Ok(LabeledMatrix::new(table.instruments(), matrix)?)
    }
}

/// Normalizes a covariance matrix into a correlation matrix.
///
/// An instrument with zero variance gets a zero row and column with 1 on the
/// diagonal.
pub fn correlation_from_covariance(covariance: &LabeledMatrix) -> Result<LabeledMatrix, CovarianceError> {
    let cov = covariance.matrix();
    let n = covariance.dim();
    let std_devs: Vec<f64> = cov.diagonal().iter().map(|v| v.max(0.0).sqrt()).collect();

    let mut corr = Matrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let value = if i == j {
                1.0
            } else if std_devs[i] > MIN_STD_DEV && std_devs[j] > MIN_STD_DEV {
                (cov.get(i, j) / (std_devs[i] * std_devs[j])).clamp(-1.0, 1.0)
            } else {
                0.0
            };
            corr.set(i, j, value);
            corr.set(j, i, value);
        }
    }

    Ok(LabeledMatrix::new(covariance.labels().to_vec(), corr)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use core_types::ReturnSeries;

    fn table(series: Vec<(&str, Vec<f64>)>) -> ReturnTable {
        let periods = series.first().map_or(0, |(_, r)| r.len());
        let dates = (0..periods)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d as u32 + 2).unwrap())
            .collect();
        ReturnTable {
            dates,
            series: series
                .into_iter()
                .map(|(symbol, returns)| ReturnSeries::new(symbol, returns))
                .collect(),
        }
    }

    #[test]
    fn sample_covariance_uses_bessel_correction() {
        let t = table(vec![("A", vec![1.0, 2.0, 3.0]), ("B", vec![2.0, 4.0, 6.0])]);
        let cov = CovarianceMatrixBuilder::new().build(&t).unwrap();
        let m = cov.matrix();

        assert_relative_eq!(m.get(0, 0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.get(1, 1), 4.0, epsilon = 1e-12);
        assert_relative_eq!(m.get(0, 1), 2.0, epsilon = 1e-12);
        assert_eq!(m.get(0, 1), m.get(1, 0));
        assert_eq!(cov.labels()[1].as_str(), "B");
    }

    #[test]
    fn two_observations_give_defined_covariance() {
        let t = table(vec![("A", vec![0.01, -0.02]), ("B", vec![0.03, 0.01])]);
        let cov = CovarianceMatrixBuilder::new().build(&t).unwrap();
        assert!(cov.matrix().is_finite());
        assert_relative_eq!(cov.matrix().get(0, 0), 0.00045, epsilon = 1e-15);
    }

    #[test]
    fn single_observation_is_degenerate() {
        let t = table(vec![("A", vec![0.01])]);
        assert_eq!(
            CovarianceMatrixBuilder::new().build(&t).unwrap_err(),
            CovarianceError::DegenerateSample { observations: 1 }
        );
    }

    #[test]
    fn constant_series_yields_zero_row_and_column() {
        let t = table(vec![("A", vec![0.01, -0.02, 0.03]), ("FLAT", vec![0.0, 0.0, 0.0])]);
        let cov = CovarianceMatrixBuilder::new().build(&t).unwrap();
        let m = cov.matrix();
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 0), 0.0);
    }

    #[test]
    fn matrix_is_exactly_symmetric() {
        let t = table(vec![
            ("A", vec![0.013, -0.021, 0.007, 0.002]),
            ("B", vec![0.011, -0.017, 0.009, -0.004]),
            ("C", vec![-0.003, 0.005, 0.012, 0.001]),
        ]);
        let cov = CovarianceMatrixBuilder::new().build(&t).unwrap();
        assert!(cov.matrix().is_symmetric(0.0));
    }

    #[test]
    fn correlation_normalizes_and_handles_flat_series() {
        let t = table(vec![
            ("A", vec![1.0, 2.0, 3.0]),
            ("B", vec![3.0, 2.0, 1.0]),
            ("FLAT", vec![0.5, 0.5, 0.5]),
        ]);
        let cov = CovarianceMatrixBuilder::new().build(&t).unwrap();
        let corr = correlation_from_covariance(&cov).unwrap();
        let m = corr.matrix();

        assert_relative_eq!(m.get(0, 1), -1.0, epsilon = 1e-12);
        assert_eq!(m.get(2, 2), 1.0);
        assert_eq!(m.get(0, 2), 0.0);
    }
}
