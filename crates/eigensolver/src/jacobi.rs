use crate::error::SolverError;
use core_types::Matrix;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SWEEPS: usize = 50;
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Relative tolerance used when checking that the input is symmetric.
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Iteration limits for the Jacobi solver.
///
/// A sweep is one pivot search followed by one rotation, so `max_sweeps` caps
/// the number of rotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub max_sweeps: usize,
    pub tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.max_sweeps == 0 {
            return Err(SolverError::InvalidSettings(
                "max_sweeps must be at least 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolverError::InvalidSettings(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Whether the off-diagonal residual fell below tolerance before the sweep cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConvergenceStatus {
    Converged { rotations: usize },
    /// Best-effort result: the largest remaining off-diagonal magnitude is `residual`.
    IterationCapReached { rotations: usize, residual: f64 },
}

impl ConvergenceStatus {
    pub fn is_converged(&self) -> bool {
        matches!(self, ConvergenceStatus::Converged { .. })
    }

    pub fn rotations(&self) -> usize {
        match *self {
            ConvergenceStatus::Converged { rotations } => rotations,
            ConvergenceStatus::IterationCapReached { rotations, .. } => rotations,
        }
    }
}

/// Unordered eigenpairs. Column `i` of `eigenvectors` belongs to `eigenvalues[i]`.
///
/// Eigenvector signs are an artifact of the rotation sequence and carry no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    pub eigenvalues: Vec<f64>,
    pub eigenvectors: Matrix,
    pub status: ConvergenceStatus,
}

impl EigenDecomposition {
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    pub fn eigenvector(&self, index: usize) -> Vec<f64> {
        self.eigenvectors.column(index)
    }
}

/// Classical Jacobi eigenvalue method for small dense symmetric matrices.
///
/// Every sweep rotates away the largest off-diagonal entry, which strictly
/// decreases the off-diagonal sum of squares. Intended for matrices of a few
/// dozen rows at most.
#[derive(Debug, Clone, Default)]
pub struct JacobiEigensolver {
    settings: SolverSettings,
}

impl JacobiEigensolver {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Decomposes `matrix`. The input is never modified.
    ///
    /// Hitting the sweep cap is not an error; it is reported through
    /// `EigenDecomposition::status`.
    pub fn solve(&self, matrix: &Matrix) -> Result<EigenDecomposition, SolverError> {
        self.settings.validate()?;
        let mut a = symmetric_working_copy(matrix)?;
        let n = a.rows();
        let mut v = Matrix::identity(n);

        let mut rotations = 0;
        let mut converged = false;
        for _ in 0..self.settings.max_sweeps {
            let Some((p, q, max_off)) = largest_off_diagonal(&a) else {
                converged = true;
                break;
            };
            if max_off < self.settings.tolerance {
                converged = true;
                break;
            }
            rotate(&mut a, &mut v, p, q);
            rotations += 1;
        }

        let status = if converged {
            ConvergenceStatus::Converged { rotations }
        } else {
            let residual = largest_off_diagonal(&a).map_or(0.0, |(_, _, off)| off);
            if residual < self.settings.tolerance {
                ConvergenceStatus::Converged { rotations }
            } else {
                tracing::warn!(
                    rotations,
                    residual,
                    tolerance = self.settings.tolerance,
                    "Jacobi solver reached its sweep cap before converging; returning best-effort eigenpairs."
                );
                ConvergenceStatus::IterationCapReached { rotations, residual }
            }
        };

        let eigenvalues = a.diagonal();
        if let Some(index) = eigenvalues.iter().position(|e| !e.is_finite()) {
            return Err(SolverError::NonFinite { row: index, col: index });
        }
        if let Some((row, col)) = v.first_non_finite() {
            return Err(SolverError::NonFinite { row, col });
        }

        tracing::debug!(n, rotations, converged = status.is_converged(), "Jacobi decomposition finished.");

        Ok(EigenDecomposition {
            eigenvalues,
            eigenvectors: v,
            status,
        })
    }
}

/// Validates the input and returns an exactly symmetric copy of it.
fn symmetric_working_copy(matrix: &Matrix) -> Result<Matrix, SolverError> {
    if !matrix.is_square() {
        return Err(SolverError::NotSquare {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    if let Some((row, col)) = matrix.first_non_finite() {
        return Err(SolverError::NonFinite { row, col });
    }

    let n = matrix.rows();
    let mut a = matrix.clone();
    for i in 0..n {
        for j in (i + 1)..n {
            let upper = matrix.get(i, j);
            let lower = matrix.get(j, i);
            let scale = 1.0 + upper.abs().max(lower.abs());
            if (upper - lower).abs() > SYMMETRY_TOLERANCE * scale {
                return Err(SolverError::NotSymmetric { row: i, col: j });
            }
            let mid = 0.5 * (upper + lower);
            a.set(i, j, mid);
            a.set(j, i, mid);
        }
    }
    Ok(a)
}

/// Finds the pivot `(p, q, |a_pq|)` with `p < q` and the largest magnitude.
/// Returns `None` for matrices smaller than 2x2.
fn largest_off_diagonal(a: &Matrix) -> Option<(usize, usize, f64)> {
    let n = a.rows();
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            let value = a.get(i, j).abs();
            match best {
                Some((_, _, current)) if value <= current => {}
                _ => best = Some((i, j, value)),
            }
        }
    }
    best
}

/// Applies the plane rotation that zeroes `a[p][q]`, accumulating it into `v`.
fn rotate(a: &mut Matrix, v: &mut Matrix, p: usize, q: usize) {
    let n = a.rows();
    let app = a.get(p, p);
    let aqq = a.get(q, q);
    let apq = a.get(p, q);

    let theta = 0.5 * (2.0 * apq).atan2(aqq - app);
    let (s, c) = theta.sin_cos();

    for k in 0..n {
        if k == p || k == q {
            continue;
        }
        let akp = a.get(k, p);
        let akq = a.get(k, q);
        let new_kp = c * akp - s * akq;
        let new_kq = s * akp + c * akq;
        a.set(k, p, new_kp);
        a.set(p, k, new_kp);
        a.set(k, q, new_kq);
        a.set(q, k, new_kq);
    }

    a.set(p, p, c * c * app - 2.0 * c * s * apq + s * s * aqq);
    a.set(q, q, s * s * app + 2.0 * c * s * apq + c * c * aqq);
    a.set(p, q, 0.0);
    a.set(q, p, 0.0);

    for k in 0..n {
        let vkp = v.get(k, p);
        let vkq = v.get(k, q);
        v.set(k, p, c * vkp - s * vkq);
        v.set(k, q, s * vkp + c * vkq);
    }

    tracing::trace!(p, q, theta, "Applied Jacobi rotation.");
}
