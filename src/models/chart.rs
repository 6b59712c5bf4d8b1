//! Wire format of the chart API used by [`YahooProvider`](crate::provider::YahooProvider).

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::models::PriceSeries;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Convert the first chart result into a price series.
    ///
    /// Returns `None` when the API answered with an error object or no
    /// result, which is how unknown or delisted symbols are reported.
    pub fn into_series(self, ticker: &str) -> Option<PriceSeries> {
        if self.chart.error.is_some() {
            return None;
        }
        let result = self.chart.result?.into_iter().next()?;
        let offset = result.meta.gmtoffset;
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();
        let rows = result
            .timestamp
            .into_iter()
            .zip(closes)
            .filter_map(|(ts, close)| trading_date(ts, offset).map(|d| (d, close)));
        let series = PriceSeries::from_unsorted(ticker, rows);
        if series.is_empty() {
            None
        } else {
            Some(series)
        }
    }
}

/// Calendar date on the exchange for a bar timestamp.
fn trading_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_closes_and_skips_nulls() {
        let body = serde_json::json!({
            "chart": {
                "result": [{
                    "meta": { "symbol": "AAPL", "currency": "USD", "gmtoffset": -14400 },
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": { "quote": [{ "close": [185.64, null, 181.91] }] }
                }],
                "error": null
            }
        });
        let response: ChartResponse = serde_json::from_value(body).unwrap();
        let series = response.into_series("AAPL").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.observations[0].0,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(series.observations[1].1, 181.91);
    }

    #[test]
    fn error_object_means_no_series() {
        let body = serde_json::json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        });
        let response: ChartResponse = serde_json::from_value(body).unwrap();
        assert!(response.into_series("ZZZZ").is_none());
    }
}
