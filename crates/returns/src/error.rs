use chrono::NaiveDate;
use core_types::InstrumentId;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReturnsError {
    #[error("No instruments were supplied")]
    EmptyBasket,

    #[error("Not enough data for {instrument}: {observations} price observation(s), at least 2 required")]
    InsufficientData {
        instrument: InstrumentId,
        observations: usize,
    },

    #[error("Series length mismatch for {instrument}: expected {expected} observations, got {actual}")]
    LengthMismatch {
        instrument: InstrumentId,
        expected: usize,
        actual: usize,
    },

    #[error("Dates of {instrument} are not aligned with the basket at index {index}")]
    DateMismatch { instrument: InstrumentId, index: usize },

    #[error("Dates of {instrument} are not strictly increasing at index {index}")]
    UnorderedDates { instrument: InstrumentId, index: usize },

    #[error("Invalid price {price} for {instrument} on {date}: prices must be positive")]
    InvalidPrice {
        instrument: InstrumentId,
        date: NaiveDate,
        price: Decimal,
    },

    #[error("Non-finite return for {instrument} on {date}")]
    NonFiniteReturn { instrument: InstrumentId, date: NaiveDate },

    #[error("Invalid date window: start {start} must be before end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}
