//! # Eigentrend Returns
//!
//! Turns aligned closing-price series into simple daily return series, the
//! first stage of the PCA pipeline.
//!
//! - `ReturnSeriesBuilder`: validates alignment and prices, then computes returns.
//! - `DateWindow`: an inclusive trading-date range applied before computing returns.
//! - `ReturnsError`: every way the input can be unusable.

pub mod builder;
pub mod error;

pub use builder::{DateWindow, ReturnSeriesBuilder};
pub use error::ReturnsError;
