use chrono::NaiveDate;
use core_types::InstrumentId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Failed to read price file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse price document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Price document contains no dates")]
    Empty,

    #[error("No quote for {instrument} on {date}")]
    MissingQuote { date: NaiveDate, instrument: InstrumentId },
}
