//! # Eigentrend Analytics Engine
//!
//! This crate turns the price history of a basket of instruments into a
//! principal component analysis of their daily returns: the dominant common
//! trend and each instrument's contribution to it.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O. Prices come in as `PriceSeries`, a `PcaReport` goes out.
//! - **Stateless Calculation:** The `PcaEngine` only holds configuration. Each call
//!   builds fresh matrices, so one engine can be shared across threads.
//!
//! ## Public API
//!
//! - `PcaEngine`: returns → covariance → Jacobi eigensolver → interpretation.
//! - `PcaInterpreter`: sorts eigenpairs and derives variance explained and the
//!   main trend instrument.
//! - `PcaReport` / `PcaResult` / `PrincipalComponent`: the outputs.
//! - `PcaError`: the failures surfaced at the pipeline boundary.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::PcaEngine;
pub use error::PcaError;
pub use interpreter::PcaInterpreter;
pub use report::{InstrumentReturn, PcaReport, PcaResult, PrincipalComponent};
