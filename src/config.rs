use std::path::PathBuf;

use crate::error::{Result, ScreenerError};
use crate::models::{Interval, Period};

pub const CHART_API_BASE: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// The chart API rejects requests without a browser-like agent.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// S&P 500 index.
pub const DEFAULT_BENCHMARK: &str = "^GSPC";

pub const DEFAULT_TICKERS: [&str; 6] = ["AAPL", "MSFT", "GOOGL", "TSLA", "KO", "NVDA"];

pub const DEFAULT_ANNUAL_RISK_FREE_RATE: f64 = 0.04;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("stock-screener-sdk")
    } else {
        PathBuf::from(".stock-screener-sdk-cache")
    }
}

/// Options shared by every run of a [`StockScreener`](crate::StockScreener).
///
/// `risk_free_rate` is per period. When it is `None` the annual rate is
/// divided by `periods_per_year`, and when `periods_per_year` is `None` it
/// follows the sampling interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfig {
    pub benchmark: String,
    pub period: Period,
    pub interval: Interval,
    pub annual_risk_free_rate: f64,
    pub risk_free_rate: Option<f64>,
    pub periods_per_year: Option<u32>,
    pub filter: bool,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            benchmark: DEFAULT_BENCHMARK.to_string(),
            period: Period::default(),
            interval: Interval::default(),
            annual_risk_free_rate: DEFAULT_ANNUAL_RISK_FREE_RATE,
            risk_free_rate: None,
            periods_per_year: None,
            filter: false,
        }
    }
}

impl ScreenerConfig {
    pub fn periods_per_year(&self) -> u32 {
        self.periods_per_year
            .unwrap_or_else(|| self.interval.periods_per_year())
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
            .unwrap_or(self.annual_risk_free_rate / self.periods_per_year() as f64)
    }

    pub fn validate(&self) -> Result<()> {
        if self.benchmark.trim().is_empty() {
            return Err(ScreenerError::InvalidArgument(
                "benchmark identifier must not be empty".into(),
            ));
        }
        if self.periods_per_year() == 0 {
            return Err(ScreenerError::InvalidArgument(
                "periods_per_year must be positive".into(),
            ));
        }
        if !self.annual_risk_free_rate.is_finite() || !self.risk_free_rate().is_finite() {
            return Err(ScreenerError::InvalidArgument(
                "risk-free rate must be finite".into(),
            ));
        }
        Ok(())
    }
}
