//! Stock screener SDK for Rust.
//!
//! Fetches closing prices for a list of tickers and a benchmark index,
//! converts them to aligned period returns and computes beta, Sharpe,
//! Sortino, CAPM alpha and Treynor for each ticker. Results are ranked by
//! Sharpe ratio, labelled with a short remark and can be narrowed to
//! low-beta, high-Sharpe names.
//!
//! # Quick start
//!
//! ```no_run
//! use stock_screener::StockScreener;
//!
//! let screener = StockScreener::builder().build().unwrap();
//!
//! // Rank a few tickers against the S&P 500 over the last year
//! let request = screener.request(["AAPL", "MSFT", "KO"]);
//! let run = screener.run_screener(&request).unwrap();
//! println!("{run}");
//!
//! // Only beta < 1 and Sharpe > 1.2
//! let picks = screener.run_screener_filtered(&request).unwrap();
//! ```

pub mod aligner;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod ratios;
pub mod remarks;
pub mod screener;
pub mod stats;

#[cfg(feature = "async")]
pub use async_client::AsyncStockScreener;
pub use cache::CacheManager;
pub use config::ScreenerConfig;
pub use error::{Result, ScreenerError, Stage};
pub use models::{
    AlignedPair, Interval, Period, PriceFrame, PriceSeries, RatioResult, Ratios, ReturnSeries,
    SkippedInstrument,
};
pub use provider::{FetchRequest, InMemoryProvider, PriceHistoryProvider, YahooProvider};
pub use ratios::{compute_ratios, RatioParams};
pub use screener::ScreenerRun;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ScreenRequest
// ---------------------------------------------------------------------------

/// Inputs of one screener invocation.
///
/// The per-period risk-free rate is the annual rate divided by
/// `periods_per_year` unless an explicit override is set.
/// [`interval()`](Self::interval) keeps `periods_per_year` and so the derived
/// rate in step with the sampling interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRequest {
    pub tickers: Vec<String>,
    pub benchmark: String,
    pub period: Period,
    pub interval: Interval,
    pub annual_risk_free_rate: f64,
    pub risk_free_override: Option<f64>,
    pub periods_per_year: u32,
    pub filter: bool,
}

impl ScreenRequest {
    /// A request for `tickers` with the default configuration.
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_config(tickers, &ScreenerConfig::default())
    }

    pub fn from_config<I, S>(tickers: I, config: &ScreenerConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
            benchmark: config.benchmark.clone(),
            period: config.period,
            interval: config.interval,
            annual_risk_free_rate: config.annual_risk_free_rate,
            risk_free_override: config.risk_free_rate,
            periods_per_year: config.periods_per_year(),
            filter: config.filter,
        }
    }

    pub fn benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = benchmark.into();
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Set the sampling interval and the matching annualization constant.
    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self.periods_per_year = interval.periods_per_year();
        self
    }

    /// Annual risk-free rate; clears any per-period override.
    pub fn annual_risk_free_rate(mut self, rate: f64) -> Self {
        self.annual_risk_free_rate = rate;
        self.risk_free_override = None;
        self
    }

    /// Per-period risk-free rate, used as is whatever the interval.
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_override = Some(rate);
        self
    }

    pub fn periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = periods;
        self
    }

    pub fn filter(mut self, filter: bool) -> Self {
        self.filter = filter;
        self
    }

    /// Risk-free rate per sampling period.
    pub fn per_period_risk_free_rate(&self) -> f64 {
        self.risk_free_override
            .unwrap_or(self.annual_risk_free_rate / self.periods_per_year as f64)
    }

    fn validate(&self) -> Result<()> {
        if self.tickers.is_empty() {
            return Err(ScreenerError::InvalidArgument(
                "at least one ticker is required".into(),
            ));
        }
        if let Some(blank) = self.tickers.iter().find(|t| t.trim().is_empty()) {
            return Err(ScreenerError::InvalidArgument(format!(
                "blank ticker identifier: {blank:?}"
            )));
        }
        if self.benchmark.trim().is_empty() {
            return Err(ScreenerError::InvalidArgument(
                "benchmark identifier must not be empty".into(),
            ));
        }
        if self.periods_per_year == 0 {
            return Err(ScreenerError::InvalidArgument(
                "periods_per_year must be positive".into(),
            ));
        }
        if !self.annual_risk_free_rate.is_finite()
            || !self.per_period_risk_free_rate().is_finite()
        {
            return Err(ScreenerError::InvalidArgument(
                "risk-free rate must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Requested tickers with repeats removed, first occurrence kept.
    fn unique_tickers(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.tickers.len());
        for t in &self.tickers {
            if !out.contains(t) {
                out.push(t.clone());
            }
        }
        out
    }

    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest {
            instruments: self.unique_tickers(),
            benchmark: self.benchmark.clone(),
            period: self.period,
            interval: self.interval,
        }
    }

    pub fn params(&self) -> RatioParams {
        RatioParams {
            risk_free_rate: self.per_period_risk_free_rate(),
            periods_per_year: self.periods_per_year,
        }
    }
}

// ---------------------------------------------------------------------------
// ScreenerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`StockScreener`].
///
/// Use [`StockScreener::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ScreenerBuilder::build).
pub struct ScreenerBuilder {
    config: ScreenerConfig,
    timeout: Duration,
    cache_dir: Option<PathBuf>,
    use_cache: bool,
    offline: bool,
    provider: Option<Box<dyn PriceHistoryProvider>>,
}

impl Default for ScreenerBuilder {
    fn default() -> Self {
        Self {
            config: ScreenerConfig::default(),
            timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
            cache_dir: None,
            use_cache: false,
            offline: false,
            provider: None,
        }
    }
}

impl ScreenerBuilder {
    /// Benchmark index identifier. Defaults to `^GSPC`.
    pub fn benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.config.benchmark = benchmark.into();
        self
    }

    /// History window. Defaults to one year.
    pub fn period(mut self, period: Period) -> Self {
        self.config.period = period;
        self
    }

    /// Sampling interval. Defaults to one trading day.
    ///
    /// Unless [`periods_per_year`](Self::periods_per_year) is set, the
    /// annualization constant follows the interval.
    pub fn interval(mut self, interval: Interval) -> Self {
        self.config.interval = interval;
        self
    }

    /// Annual risk-free rate, divided by `periods_per_year` for each period.
    /// Defaults to 4%.
    pub fn annual_risk_free_rate(mut self, rate: f64) -> Self {
        self.config.annual_risk_free_rate = rate;
        self
    }

    /// Per-period risk-free rate, overriding the annual rate.
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.config.risk_free_rate = Some(rate);
        self
    }

    pub fn periods_per_year(mut self, periods: u32) -> Self {
        self.config.periods_per_year = Some(periods);
        self
    }

    /// Apply the beta/Sharpe filter in [`StockScreener::run`].
    pub fn filter(mut self, filter: bool) -> Self {
        self.config.filter = filter;
        self
    }

    /// HTTP timeout for price downloads. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cache raw chart responses in `path`.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self.use_cache = true;
        self
    }

    /// Cache raw chart responses in the platform cache directory.
    pub fn cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Serve prices from the cache only. Implies caching.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        if offline {
            self.use_cache = true;
        }
        self
    }

    /// Use a custom price source instead of the chart API.
    pub fn provider<P: PriceHistoryProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Validate the configuration and build the screener.
    pub fn build(self) -> Result<StockScreener> {
        self.config.validate()?;
        let provider: Box<dyn PriceHistoryProvider> = match self.provider {
            Some(provider) => provider,
            None => {
                let mut yahoo = YahooProvider::new(self.timeout)?;
                if self.use_cache {
                    yahoo = yahoo.with_cache(CacheManager::new(self.cache_dir, self.offline)?);
                }
                Box::new(yahoo)
            }
        };
        Ok(StockScreener {
            provider,
            config: self.config,
        })
    }
}

// ---------------------------------------------------------------------------
// StockScreener
// ---------------------------------------------------------------------------

/// The main entry point: a price provider plus default run options.
///
/// Every run fetches fresh data and shares no state with earlier runs.
pub struct StockScreener {
    provider: Box<dyn PriceHistoryProvider>,
    config: ScreenerConfig,
}

impl StockScreener {
    pub fn builder() -> ScreenerBuilder {
        ScreenerBuilder::default()
    }

    pub fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// A request for `tickers` seeded from this screener's configuration.
    pub fn request<I, S>(&self, tickers: I) -> ScreenRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScreenRequest::from_config(tickers, &self.config)
    }

    /// Screen the default ticker list with the configured options.
    pub fn run_default(&self) -> Result<ScreenerRun> {
        self.run(&self.request(config::DEFAULT_TICKERS))
    }

    /// Ranked or filtered view, depending on `request.filter`.
    pub fn run(&self, request: &ScreenRequest) -> Result<ScreenerRun> {
        if request.filter {
            self.run_screener_filtered(request)
        } else {
            self.run_screener(request)
        }
    }

    /// Fetch, align and compute ratios for every ticker, ranked by
    /// descending Sharpe ratio.
    ///
    /// Tickers without price data are listed in [`ScreenerRun::skipped`].
    /// A failed fetch or a benchmark without data fails the whole run.
    pub fn run_screener(&self, request: &ScreenRequest) -> Result<ScreenerRun> {
        request.validate()?;
        let fetch = request.fetch_request();
        tracing::debug!(
            provider = self.provider.name(),
            symbols = fetch.symbols().len(),
            period = %fetch.period,
            interval = %fetch.interval,
            "fetching price history"
        );
        let frame = self.provider.fetch(&fetch)?;

        let benchmark = frame
            .get(&fetch.benchmark)
            .ok_or_else(|| ScreenerError::BenchmarkMissing(fetch.benchmark.clone()))?;
        let benchmark_returns = aligner::returns(benchmark);

        let mut pairs = Vec::with_capacity(fetch.instruments.len());
        let mut skipped = Vec::new();
        for ticker in &fetch.instruments {
            match frame.get(ticker) {
                Some(series) => {
                    pairs.push(aligner::align(&aligner::returns(series), &benchmark_returns));
                }
                None => {
                    tracing::warn!(ticker = %ticker, "no price data returned, skipping");
                    skipped.push(SkippedInstrument {
                        ticker: ticker.clone(),
                        reason: "no price data returned".to_string(),
                    });
                }
            }
        }

        let results = screener::screen(&pairs, &request.params());
        let run = ScreenerRun::ranked(results, skipped);
        tracing::info!(
            screened = run.len(),
            skipped = run.skipped.len(),
            "screener run complete"
        );
        Ok(run)
    }

    /// [`run_screener`](Self::run_screener) narrowed to beta < 1 and
    /// Sharpe > 1.2.
    pub fn run_screener_filtered(&self, request: &ScreenRequest) -> Result<ScreenerRun> {
        Ok(self.run_screener(request)?.filtered())
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for StockScreener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StockScreener(provider={}, benchmark={}, period={}, interval={}, filter={})",
            self.provider.name(),
            self.config.benchmark,
            self.config.period,
            self.config.interval,
            self.config.filter
        )
    }
}
