use approx::assert_abs_diff_eq;
use core_types::Matrix;
use eigensolver::{EigenDecomposition, JacobiEigensolver, SolverSettings};

/// A generous sweep cap and a tolerance relative to the largest entry, so that
/// convergence is reachable in floating point.
fn solver(m: &Matrix) -> JacobiEigensolver {
    JacobiEigensolver::new(SolverSettings {
        max_sweeps: 1_000,
        tolerance: 1e-13 * scale(m),
    })
}

/// Builds `S * S^T`, which is symmetric positive semi-definite.
fn gram(rows: &[&[f64]]) -> Matrix {
    let n = rows.len();
    let mut m = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            let dot: f64 = rows[i].iter().zip(rows[j]).map(|(a, b)| a * b).sum();
            m.set(i, j, dot);
        }
    }
    m
}

fn fixtures() -> Vec<Matrix> {
    vec![
        gram(&[
            &[1.0, 2.0, 3.0],
            &[4.0, 5.0, 6.0],
            &[7.0, 8.0, 9.0],
            &[0.5, 1.5, 2.5],
            &[3.0, 1.0, 4.0],
        ]),
        Matrix::from_rows(vec![
            vec![2.0e-4, 1.1e-4, 0.9e-4, 0.0],
            vec![1.1e-4, 3.0e-4, 1.4e-4, 0.0],
            vec![0.9e-4, 1.4e-4, 2.5e-4, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap(),
        Matrix::from_rows(vec![
            vec![4.0, -2.0, 1.0],
            vec![-2.0, 4.0, -2.0],
            vec![1.0, -2.0, 4.0],
        ])
        .unwrap(),
        Matrix::from_rows(vec![
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap(),
    ]
}

fn scale(m: &Matrix) -> f64 {
    (0..m.rows())
        .flat_map(|i| m.row(i).to_vec())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
        .max(1.0e-300)
}

fn check_decomposition(m: &Matrix, d: &EigenDecomposition) {
    let n = m.rows();
    let tol = 1e-8 * scale(m);

    // Sum of eigenvalues equals the trace.
    let sum: f64 = d.eigenvalues.iter().sum();
    assert_abs_diff_eq!(sum, m.trace(), epsilon = 1e-6 * scale(m));

    // M * v = lambda * v for every pair.
    for i in 0..n {
        let v = d.eigenvector(i);
        let mv = m.mul_vec(&v).unwrap();
        for k in 0..n {
            assert_abs_diff_eq!(mv[k], d.eigenvalues[i] * v[k], epsilon = tol);
        }
    }

    // Eigenvectors are orthonormal.
    for i in 0..n {
        for j in 0..n {
            let dot: f64 = d
                .eigenvector(i)
                .iter()
                .zip(d.eigenvector(j))
                .map(|(a, b)| a * b)
                .sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(dot, expected, epsilon = 1e-9);
        }
    }
}

#[test]
fn decompositions_satisfy_eigen_equation_trace_and_orthonormality() {
    for m in fixtures() {
        let d = solver(&m).solve(&m).unwrap();
        assert!(d.status.is_converged(), "did not converge: {:?}", d.status);
        check_decomposition(&m, &d);
    }
}

#[test]
fn trace_and_orthonormality_hold_even_at_the_default_cap() {
    for m in fixtures() {
        let d = JacobiEigensolver::default().solve(&m).unwrap();
        let sum: f64 = d.eigenvalues.iter().sum();
        assert_abs_diff_eq!(sum, m.trace(), epsilon = 1e-6 * scale(&m));

        let vt = d.eigenvectors.transpose();
        for i in 0..m.rows() {
            let norm: f64 = vt.row(i).iter().map(|x| x * x).sum();
            assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn zero_row_and_column_yield_zero_eigenvalue_on_that_axis() {
    let m = fixtures().remove(1);
    let d = solver(&m).solve(&m).unwrap();

    let zero = d
        .eigenvalues
        .iter()
        .position(|e| e.abs() < 1e-18)
        .expect("a zero eigenvalue");
    let v = d.eigenvector(zero);
    assert_abs_diff_eq!(v[3].abs(), 1.0, epsilon = 1e-9);
}

#[test]
fn rank_one_matrix_has_single_non_zero_eigenvalue() {
    let m = fixtures().remove(3);
    let d = solver(&m).solve(&m).unwrap();

    let mut values = d.eigenvalues.clone();
    values.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_abs_diff_eq!(values[0], 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(values[1], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(values[2], 0.0, epsilon = 1e-9);
}

#[test]
fn diagonal_input_returns_its_entries_and_standard_basis() {
    let diag = [0.3, 5.0, 1.2, 0.0, 2.2];
    let m = Matrix::from_diagonal(&diag);
    let d = solver(&m).solve(&m).unwrap();

    assert_eq!(d.eigenvalues, diag.to_vec());
    for i in 0..diag.len() {
        let v = d.eigenvector(i);
        for (k, x) in v.iter().enumerate() {
            let expected = if k == i { 1.0 } else { 0.0 };
            assert_eq!(x.abs(), expected);
        }
    }
}
