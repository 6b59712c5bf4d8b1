//! Price history from the Yahoo Finance chart API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::cache::CacheManager;
use crate::config;
use crate::error::{Result, ScreenerError};
use crate::models::{ChartResponse, Interval, Period, PriceFrame, PriceSeries};
use crate::provider::{FetchRequest, PriceHistoryProvider};

/// Blocking client for the chart API, one request per symbol.
///
/// Unknown or delisted symbols come back as missing from the frame. Any
/// transport failure or server error aborts the whole batch.
pub struct YahooProvider {
    client: Client,
    base_url: String,
    cache: Option<CacheManager>,
}

impl YahooProvider {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            client,
            base_url: config::CHART_API_BASE.to_string(),
            cache: None,
        })
    }

    /// Point at a different chart endpoint (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&CacheManager> {
        self.cache.as_ref()
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/{}", self.base_url, symbol.replace('^', "%5E"))
    }

    /// Fetch one symbol, consulting the cache first.
    fn fetch_symbol(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Option<PriceSeries>> {
        if let Some(cache) = &self.cache {
            if let Some(value) = cache.load(symbol, period, interval)? {
                match serde_json::from_value::<ChartResponse>(value) {
                    Ok(response) => return Ok(response.into_series(symbol)),
                    Err(e) => {
                        tracing::warn!(symbol, error = %e, "cached chart has unexpected shape, refetching");
                    }
                }
            }
            if cache.offline {
                tracing::debug!(symbol, "not cached and offline mode is enabled");
                return Ok(None);
            }
        }

        let url = self.chart_url(symbol);
        tracing::debug!(%url, range = period.code(), interval = interval.code(), "requesting chart");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("range", period.code()),
                ("interval", interval.code()),
                ("events", "history"),
            ])
            .send()
            .map_err(|e| ScreenerError::DataUnavailable(format!("{symbol}: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            tracing::debug!(symbol, %status, "no chart for symbol");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ScreenerError::DataUnavailable(format!(
                "{symbol}: chart request returned {status}"
            )));
        }

        let value: serde_json::Value = resp
            .json()
            .map_err(|e| ScreenerError::DataUnavailable(format!("{symbol}: {e}")))?;
        let response: ChartResponse = serde_json::from_value(value.clone()).map_err(|e| {
            ScreenerError::DataUnavailable(format!("{symbol}: malformed chart response: {e}"))
        })?;
        let series = response.into_series(symbol);

        if let (Some(cache), Some(_)) = (&self.cache, &series) {
            cache.store(symbol, period, interval, &value)?;
        }
        Ok(series)
    }
}

impl PriceHistoryProvider for YahooProvider {
    fn fetch(&self, request: &FetchRequest) -> Result<PriceFrame> {
        let symbols = request.symbols();
        let mut frame = PriceFrame::new(symbols.clone());
        for symbol in &symbols {
            if let Some(series) = self.fetch_symbol(symbol, request.period, request.interval)? {
                frame.insert(series);
            }
        }
        Ok(frame)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
