//! # Eigentrend Market Data
//!
//! Loads closing prices for the configured basket from JSON price documents and
//! aligns them into `PriceSeries` ready for the analytics engine.

pub mod error;
pub mod loader;

pub use error::MarketDataError;
pub use loader::{load_price_file, parse_price_document};
