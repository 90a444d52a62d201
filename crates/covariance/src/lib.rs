//! # Eigentrend Covariance
//!
//! Builds the sample covariance matrix (and its correlation counterpart) from a
//! date-aligned `ReturnTable`. Both matrices carry the instrument labels of their
//! rows and columns.

pub mod builder;
pub mod error;

pub use builder::{CovarianceMatrixBuilder, correlation_from_covariance};
pub use error::CovarianceError;
