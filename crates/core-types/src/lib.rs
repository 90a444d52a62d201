pub mod enums;
pub mod error;
pub mod matrix;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::DominanceRule;
pub use error::CoreError;
pub use matrix::{LabeledMatrix, Matrix};
pub use structs::{InstrumentId, PricePoint, PriceSeries, ReturnSeries, ReturnTable};
