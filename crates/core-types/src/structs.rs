use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The identifier of a single instrument in the basket (e.g., "RELIANCE.NS").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl From<String> for InstrumentId {
    fn from(symbol: String) -> Self {
        Self(symbol)
    }
}

/// A single closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// The ordered closing prices of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub instrument: InstrumentId,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(instrument: impl Into<InstrumentId>, points: Vec<PricePoint>) -> Self {
        Self {
            instrument: instrument.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }
}

/// Simple daily returns of one instrument. Index `k` is the transition from
/// observation `k` to observation `k + 1` of the source prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    pub instrument: InstrumentId,
    pub returns: Vec<f64>,
}

impl ReturnSeries {
    pub fn new(instrument: impl Into<InstrumentId>, returns: Vec<f64>) -> Self {
        Self {
            instrument: instrument.into(),
            returns,
        }
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Arithmetic mean of the returns, or `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.returns.is_empty() {
            return None;
        }
        Some(self.returns.iter().sum::<f64>() / self.returns.len() as f64)
    }

    /// Compounded return over the whole series: `prod(1 + r) - 1`.
    pub fn cumulative_return(&self) -> f64 {
        self.returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
    }
}

/// Date-aligned return series for a basket of instruments.
///
/// Every series has the same length as `dates`, and `dates[k]` is the date of the
/// later observation of transition `k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnTable {
    pub dates: Vec<NaiveDate>,
    pub series: Vec<ReturnSeries>,
}

impl ReturnTable {
    /// Number of return observations per instrument.
    pub fn periods(&self) -> usize {
        self.dates.len()
    }

    pub fn instruments(&self) -> Vec<InstrumentId> {
        self.series.iter().map(|s| s.instrument.clone()).collect()
    }
}
