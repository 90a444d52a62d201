use crate::error::MarketDataError;
use chrono::NaiveDate;
use core_types::{InstrumentId, PricePoint, PriceSeries};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// The on-disk shape of a price document: `{ "2024-01-02": { "TCS.NS": 3500.5, ... } }`.
type PriceDocument = BTreeMap<NaiveDate, HashMap<String, Decimal>>;

/// Reads a JSON price document from disk. See [`parse_price_document`].
pub fn load_price_file(
    path: impl AsRef<Path>,
    basket: &[InstrumentId],
) -> Result<Vec<PriceSeries>, MarketDataError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading price document.");
    let contents = std::fs::read_to_string(path)?;
    parse_price_document(&contents, basket)
}

/// Parses a price document into one `PriceSeries` per basket instrument.
///
/// Dates come out ascending and the series follow the basket order. Every basket
/// instrument must be quoted on every date; instruments outside the basket are
/// ignored.
pub fn parse_price_document(
    json: &str,
    basket: &[InstrumentId],
) -> Result<Vec<PriceSeries>, MarketDataError> {
    let document: PriceDocument = serde_json::from_str(json)?;
    if document.is_empty() {
        return Err(MarketDataError::Empty);
    }

    let mut series: Vec<PriceSeries> = basket
        .iter()
        .map(|instrument| PriceSeries::new(instrument.clone(), Vec::with_capacity(document.len())))
        .collect();

    for (date, quotes) in &document {
        for s in &mut series {
            let close = quotes.get(s.instrument.as_str()).copied().ok_or_else(|| {
                MarketDataError::MissingQuote {
                    date: *date,
                    instrument: s.instrument.clone(),
                }
            })?;
            s.points.push(PricePoint { date: *date, close });
        }
    }

    tracing::debug!(
        instruments = series.len(),
        dates = document.len(),
        "Parsed price document."
    );

    Ok(series)
}
