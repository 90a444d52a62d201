use crate::error::ReturnsError;
use chrono::NaiveDate;
use core_types::{InstrumentId, PricePoint, PriceSeries, ReturnSeries, ReturnTable};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// An inclusive range of trading dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window. The start date must be strictly before the end date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReturnsError> {
        if start >= end {
            return Err(ReturnsError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Converts aligned price series into simple daily return series.
#[derive(Debug, Clone, Default)]
pub struct ReturnSeriesBuilder {
    window: Option<DateWindow>,
}

impl ReturnSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the computation to observations inside `window`.
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn window(&self) -> Option<DateWindow> {
        self.window
    }

    /// Builds `r[t] = (p[t] - p[t-1]) / p[t-1]` for every instrument.
    ///
    /// All series must share the same ordered dates (after windowing), hold at
    /// least two observations, and contain only positive prices.
    pub fn build(&self, prices: &[PriceSeries]) -> Result<ReturnTable, ReturnsError> {
        if prices.is_empty() {
            return Err(ReturnsError::EmptyBasket);
        }

        let windowed: Vec<(&InstrumentId, Vec<PricePoint>)> = prices
            .iter()
            .map(|s| (&s.instrument, self.select(&s.points)))
            .collect();

        for (instrument, points) in &windowed {
            if points.len() < 2 {
                return Err(ReturnsError::InsufficientData {
                    instrument: (*instrument).clone(),
                    observations: points.len(),
                });
            }
            check_increasing(instrument, points)?;
        }

        let (_, reference) = &windowed[0];
        for (instrument, points) in windowed.iter().skip(1) {
            if points.len() != reference.len() {
                return Err(ReturnsError::LengthMismatch {
                    instrument: (*instrument).clone(),
                    expected: reference.len(),
                    actual: points.len(),
                });
            }
            if let Some(index) = points
                .iter()
                .zip(reference)
                .position(|(a, b)| a.date != b.date)
            {
                return Err(ReturnsError::DateMismatch {
                    instrument: (*instrument).clone(),
                    index,
                });
            }
        }

        let series = windowed
            .iter()
            .map(|(instrument, points)| simple_returns(instrument, points))
            .collect::<Result<Vec<_>, _>>()?;

        let dates: Vec<NaiveDate> = reference.iter().skip(1).map(|p| p.date).collect();

        tracing::debug!(
            instruments = series.len(),
            periods = dates.len(),
            "Built return series."
        );

        Ok(ReturnTable { dates, series })
    }

    fn select(&self, points: &[PricePoint]) -> Vec<PricePoint> {
        match &self.window {
            Some(window) => points
                .iter()
                .filter(|p| window.contains(p.date))
                .copied()
                .collect(),
            None => points.to_vec(),
        }
    }
}

fn check_increasing(instrument: &InstrumentId, points: &[PricePoint]) -> Result<(), ReturnsError> {
    match points.windows(2).position(|w| w[1].date <= w[0].date) {
        Some(index) => Err(ReturnsError::UnorderedDates {
            instrument: instrument.clone(),
            index: index + 1,
        }),
        None => Ok(()),
    }
}

fn to_price(instrument: &InstrumentId, point: &PricePoint) -> Result<f64, ReturnsError> {
    let invalid = || ReturnsError::InvalidPrice {
        instrument: instrument.clone(),
        date: point.date,
        price: point.close,
    };

    if point.close <= Decimal::ZERO {
        return Err(invalid());
    }
    point
        .close
        .to_f64()
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(invalid)
}

fn simple_returns(instrument: &InstrumentId, points: &[PricePoint]) -> Result<ReturnSeries, ReturnsError> {
    let prices = points
        .iter()
        .map(|p| to_price(instrument, p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut returns = Vec::with_capacity(prices.len() - 1);
    for (t, w) in prices.windows(2).enumerate() {
        let r = (w[1] - w[0]) / w[0];
        if !r.is_finite() {
            return Err(ReturnsError::NonFiniteReturn {
                instrument: instrument.clone(),
                date: points[t + 1].date,
            });
        }
        returns.push(r);
    }

    Ok(ReturnSeries::new(instrument.clone(), returns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn series(symbol: &str, closes: &[Decimal]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: day(i as u32 + 1),
                close,
            })
            .collect();
        PriceSeries::new(symbol, points)
    }

    #[test]
    fn computes_simple_returns() {
        let prices = vec![series("TCS.NS", &[dec!(100), dec!(110), dec!(99)])];
        let table = ReturnSeriesBuilder::new().build(&prices).unwrap();

        assert_eq!(table.dates, vec![day(2), day(3)]);
        assert_relative_eq!(table.series[0].returns[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(table.series[0].returns[1], -0.1, epsilon = 1e-12);
    }

    #[test]
    fn rejects_single_observation() {
        let prices = vec![series("ITC.NS", &[dec!(400)])];
        let err = ReturnSeriesBuilder::new().build(&prices).unwrap_err();
        assert_eq!(
            err,
            ReturnsError::InsufficientData {
                instrument: "ITC.NS".into(),
                observations: 1
            }
        );
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let prices = vec![
            series("A", &[dec!(1), dec!(2), dec!(3)]),
            series("B", &[dec!(1), dec!(2)]),
        ];
        let err = ReturnSeriesBuilder::new().build(&prices).unwrap_err();
        assert!(matches!(err, ReturnsError::LengthMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn rejects_misaligned_dates() {
        let mut b = series("B", &[dec!(1), dec!(2)]);
        b.points[1].date = day(5);
        let prices = vec![series("A", &[dec!(1), dec!(2)]), b];
        let err = ReturnSeriesBuilder::new().build(&prices).unwrap_err();
        assert!(matches!(err, ReturnsError::DateMismatch { index: 1, .. }));
    }

    #[test]
    fn rejects_zero_and_negative_prices() {
        let zero = vec![series("A", &[dec!(10), dec!(0), dec!(5)])];
        assert!(matches!(
            ReturnSeriesBuilder::new().build(&zero),
            Err(ReturnsError::InvalidPrice { .. })
        ));

        let negative = vec![series("A", &[dec!(-1), dec!(5)])];
        assert!(matches!(
            ReturnSeriesBuilder::new().build(&negative),
            Err(ReturnsError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn rejects_unordered_dates() {
        let mut a = series("A", &[dec!(1), dec!(2), dec!(3)]);
        a.points.swap(1, 2);
        let err = ReturnSeriesBuilder::new().build(&[a]).unwrap_err();
        assert!(matches!(err, ReturnsError::UnorderedDates { index: 2, .. }));
    }

    #[test]
    fn window_selects_inclusive_range() {
        let prices = vec![series("A", &[dec!(10), dec!(11), dec!(12), dec!(13), dec!(14)])];
        let window = DateWindow::new(day(2), day(4)).unwrap();
        let table = ReturnSeriesBuilder::new().with_window(window).build(&prices).unwrap();

        assert_eq!(table.dates, vec![day(3), day(4)]);
        assert_relative_eq!(table.series[0].returns[0], 1.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn window_with_one_observation_is_insufficient() {
        let prices = vec![series("A", &[dec!(10), dec!(11), dec!(12)])];
        let window = DateWindow::new(day(3), day(20)).unwrap();
        let err = ReturnSeriesBuilder::new().with_window(window).build(&prices).unwrap_err();
        assert!(matches!(err, ReturnsError::InsufficientData { observations: 1, .. }));
    }

    #[test]
    fn window_start_must_precede_end() {
        assert!(matches!(
            DateWindow::new(day(4), day(4)),
            Err(ReturnsError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn empty_basket_is_rejected() {
        assert_eq!(
            ReturnSeriesBuilder::new().build(&[]).unwrap_err(),
            ReturnsError::EmptyBasket
        );
    }
}
