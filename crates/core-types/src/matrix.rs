use crate::error::CoreError;
use crate::structs::InstrumentId;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A dense, row-major matrix of `f64` values.
///
/// This is a plain value type: cloning produces an independent copy, and no
/// operation here mutates through a shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Builds a matrix from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CoreError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(CoreError::DimensionMismatch {
                    expected: n_cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Builds a diagonal matrix from the given entries.
    pub fn from_diagonal(diagonal: &[f64]) -> Self {
        let mut m = Self::zeros(diagonal.len(), diagonal.len());
        for (i, &d) in diagonal.iter().enumerate() {
            m.set(i, i, d);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }

    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols)).map(|i| self.get(i, i)).collect()
    }

    pub fn trace(&self) -> f64 {
        self.diagonal().iter().sum()
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t.set(c, r, self.get(r, c));
            }
        }
        t
    }

    /// Matrix-vector product `M * v`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>, CoreError> {
        if v.len() != self.cols {
            return Err(CoreError::DimensionMismatch {
                expected: self.cols,
                actual: v.len(),
            });
        }
        Ok((0..self.rows)
            .map(|r| self.row(r).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// True when every entry is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Returns the first non-finite entry as `(row, col)`, if any.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| (i / self.cols, i % self.cols))
    }

    /// True when the matrix is square and `|M[i][j] - M[j][i]| <= tolerance` for all pairs.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                if (self.get(i, j) - self.get(j, i)).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.cols + col]
    }
}

/// A square matrix whose rows and columns are both labelled by instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledMatrix {
    labels: Vec<InstrumentId>,
    matrix: Matrix,
}

impl LabeledMatrix {
    pub fn new(labels: Vec<InstrumentId>, matrix: Matrix) -> Result<Self, CoreError> {
        if !matrix.is_square() {
            return Err(CoreError::InvalidInput(
                "labeled matrix".to_string(),
                format!("expected a square matrix, got {}x{}", matrix.rows(), matrix.cols()),
            ));
        }
        if labels.len() != matrix.rows() {
            return Err(CoreError::DimensionMismatch {
                expected: matrix.rows(),
                actual: labels.len(),
            });
        }
        Ok(Self { labels, matrix })
    }

    pub fn labels(&self) -> &[InstrumentId] {
        &self.labels
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn dim(&self) -> usize {
        self.labels.len()
    }

    pub fn index_of(&self, instrument: &InstrumentId) -> Option<usize> {
        self.labels.iter().position(|l| l == instrument)
    }

    /// Looks up an entry by its row and column instruments.
    pub fn get_by_label(&self, row: &InstrumentId, col: &InstrumentId) -> Option<f64> {
        Some(self.matrix.get(self.index_of(row)?, self.index_of(col)?))
    }

    pub fn into_parts(self) -> (Vec<InstrumentId>, Matrix) {
        (self.labels, self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, CoreError::DimensionMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn mul_vec_and_trace() {
        let m = Matrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
        assert_eq!(m.mul_vec(&[1.0, 1.0]).unwrap(), vec![3.0, 4.0]);
        assert_relative_eq!(m.trace(), 5.0);
        assert!(m.mul_vec(&[1.0]).is_err());
    }

    #[test]
    fn transpose_and_symmetry() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t[(2, 1)], 6.0);
        assert!(!m.is_symmetric(1e-12));
        assert!(Matrix::identity(3).is_symmetric(0.0));
    }

    #[test]
    fn finds_non_finite_entries() {
        let mut m = Matrix::zeros(2, 2);
        assert!(m.is_finite());
        m[(1, 0)] = f64::NAN;
        assert_eq!(m.first_non_finite(), Some((1, 0)));
    }

    #[test]
    fn labeled_matrix_lookup() {
        let labels = vec![InstrumentId::from("A"), InstrumentId::from("B")];
        let m = Matrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 2.0]]).unwrap();
        let lm = LabeledMatrix::new(labels, m).unwrap();
        assert_eq!(lm.get_by_label(&"A".into(), &"B".into()), Some(0.5));
        assert_eq!(lm.get_by_label(&"A".into(), &"Z".into()), None);
    }

    #[test]
    fn labeled_matrix_requires_matching_labels() {
        let labels = vec![InstrumentId::from("A")];
        assert!(LabeledMatrix::new(labels, Matrix::identity(2)).is_err());
    }
}
