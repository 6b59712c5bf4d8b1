use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenerError};

// ---------------------------------------------------------------------------
// PriceSeries — closing prices for one instrument
// ---------------------------------------------------------------------------

/// Closing prices for one instrument, dates strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub observations: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
    /// Build a series from already ordered observations.
    ///
    /// Rejects out-of-order or duplicate dates and closes that are not
    /// finite and positive.
    pub fn new(ticker: impl Into<String>, observations: Vec<(NaiveDate, f64)>) -> Result<Self> {
        let ticker = ticker.into();
        for pair in observations.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(ScreenerError::InvalidArgument(format!(
                    "{ticker}: dates must be strictly increasing ({} then {})",
                    pair[0].0, pair[1].0
                )));
            }
        }
        if let Some((date, close)) = observations.iter().find(|(_, c)| !valid_close(*c)) {
            return Err(ScreenerError::InvalidArgument(format!(
                "{ticker}: invalid close {close} on {date}"
            )));
        }
        Ok(Self {
            ticker,
            observations,
        })
    }

    /// Normalize raw provider rows into a series.
    ///
    /// Sorts by date, keeps the last close seen for a repeated date and drops
    /// missing, non-finite or non-positive closes.
    pub fn from_unsorted<I>(ticker: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (date, close) in rows {
            match close {
                Some(c) if valid_close(c) => {
                    by_date.insert(date, c);
                }
                _ => {}
            }
        }
        Self {
            ticker: ticker.into(),
            observations: by_date.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Some((first.0, last.0)),
            _ => None,
        }
    }
}

fn valid_close(close: f64) -> bool {
    close.is_finite() && close > 0.0
}

// ---------------------------------------------------------------------------
// ReturnSeries — period-over-period fractional returns
// ---------------------------------------------------------------------------

/// Fractional returns, one element shorter than the source prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    pub ticker: String,
    pub observations: Vec<(NaiveDate, f64)>,
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|(_, r)| *r).collect()
    }
}

// ---------------------------------------------------------------------------
// AlignedPair — instrument and benchmark returns on common dates
// ---------------------------------------------------------------------------

/// Instrument and benchmark returns restricted to the dates both have.
///
/// `dates`, `instrument` and `benchmark` always have the same length, which
/// may be zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub ticker: String,
    pub dates: Vec<NaiveDate>,
    pub instrument: Vec<f64>,
    pub benchmark: Vec<f64>,
}

impl AlignedPair {
    /// Pair up raw return vectors that are already aligned by position.
    pub fn from_returns(
        ticker: impl Into<String>,
        dates: Vec<NaiveDate>,
        instrument: Vec<f64>,
        benchmark: Vec<f64>,
    ) -> Result<Self> {
        if dates.len() != instrument.len() || instrument.len() != benchmark.len() {
            return Err(ScreenerError::InvalidArgument(format!(
                "aligned series length mismatch: {} dates, {} instrument, {} benchmark",
                dates.len(),
                instrument.len(),
                benchmark.len()
            )));
        }
        if let Some(bad) = instrument.iter().chain(&benchmark).find(|v| !v.is_finite()) {
            return Err(ScreenerError::InvalidArgument(format!(
                "non-finite return in aligned series: {bad}"
            )));
        }
        Ok(Self {
            ticker: ticker.into(),
            dates,
            instrument,
            benchmark,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PriceFrame — a provider's answer for one batch
// ---------------------------------------------------------------------------

/// Closing prices for a batch of identifiers, indexed by identifier.
///
/// `requested` keeps the order in which identifiers were asked for; any of
/// them without a non-empty series is reported by [`missing`](Self::missing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFrame {
    pub requested: Vec<String>,
    pub series: BTreeMap<String, PriceSeries>,
}

impl PriceFrame {
    pub fn new(requested: Vec<String>) -> Self {
        Self {
            requested,
            series: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.ticker.clone(), series);
    }

    /// The series for `ticker`, if the provider returned any prices for it.
    pub fn get(&self, ticker: &str) -> Option<&PriceSeries> {
        self.series.get(ticker).filter(|s| !s.is_empty())
    }

    /// Requested identifiers the provider had no data for, in request order.
    pub fn missing(&self) -> Vec<String> {
        self.requested
            .iter()
            .filter(|t| self.get(t).is_none())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn new_rejects_unordered_dates() {
        let err = PriceSeries::new("AAPL", vec![(d(2), 1.0), (d(1), 2.0)]).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
        assert!(PriceSeries::new("AAPL", vec![(d(1), 1.0), (d(1), 2.0)]).is_err());
    }

    #[test]
    fn new_rejects_non_positive_close() {
        assert!(PriceSeries::new("AAPL", vec![(d(1), 1.0), (d(2), 0.0)]).is_err());
        assert!(PriceSeries::new("AAPL", vec![(d(1), f64::NAN)]).is_err());
    }

    #[test]
    fn from_unsorted_sorts_dedups_and_drops_gaps() {
        let series = PriceSeries::from_unsorted(
            "KO",
            vec![
                (d(3), Some(3.0)),
                (d(1), Some(1.0)),
                (d(2), None),
                (d(3), Some(3.5)),
                (d(4), Some(-1.0)),
            ],
        );
        assert_eq!(series.observations, vec![(d(1), 1.0), (d(3), 3.5)]);
        assert_eq!(series.date_range(), Some((d(1), d(3))));
    }

    #[test]
    fn frame_reports_missing_in_request_order() {
        let mut frame = PriceFrame::new(vec!["A".into(), "B".into(), "C".into()]);
        frame.insert(PriceSeries::new("B", vec![(d(1), 1.0)]).unwrap());
        frame.insert(PriceSeries::new("C", vec![]).unwrap());
        assert_eq!(frame.missing(), vec!["A".to_string(), "C".to_string()]);
        assert!(frame.get("B").is_some());
    }

    #[test]
    fn aligned_pair_checks_lengths() {
        assert!(AlignedPair::from_returns("X", vec![d(1)], vec![0.1], vec![]).is_err());
        let pair = AlignedPair::from_returns("X", vec![], vec![], vec![]).unwrap();
        assert!(pair.is_empty());
    }

    #[test]
    fn aligned_pair_rejects_non_finite_returns() {
        let dates = vec![d(1), d(2), d(3)];
        assert!(AlignedPair::from_returns(
            "X",
            dates.clone(),
            vec![0.01, f64::NAN, 0.02],
            vec![0.0, 0.01, 0.02]
        )
        .is_err());
        assert!(AlignedPair::from_returns(
            "X",
            dates,
            vec![0.01, 0.0, 0.02],
            vec![0.0, f64::INFINITY, 0.02]
        )
        .is_err());
    }
}
