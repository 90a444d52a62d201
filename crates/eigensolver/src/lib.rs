//! # Eigentrend Eigensolver
//!
//! A self-contained Jacobi eigenvalue solver for small, dense, real symmetric
//! matrices such as the covariance matrix of a handful of instruments.
//!
//! The solver works on a private copy of its input and reports whether it
//! converged or stopped at its sweep cap via `ConvergenceStatus`; reaching the
//! cap degrades the result but never fails the call.

pub mod error;
pub mod jacobi;

pub use error::SolverError;
pub use jacobi::{
    ConvergenceStatus, DEFAULT_MAX_SWEEPS, DEFAULT_TOLERANCE, EigenDecomposition,
    JacobiEigensolver, SolverSettings,
};
