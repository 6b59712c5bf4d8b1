//! Async wrapper around [`StockScreener`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every screener call on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! prices download.
//!
//! # Example
//!
//! ```no_run
//! use stock_screener::{AsyncStockScreener, StockScreener};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let screener = AsyncStockScreener::new(StockScreener::builder()).await.unwrap();
//!
//!     let request = screener.request(["AAPL", "KO"]).await.unwrap();
//!     let run = screener.run_screener(request).await.unwrap();
//!     println!("{run}");
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{Result, ScreenerError};
use crate::screener::ScreenerRun;
use crate::{ScreenRequest, ScreenerBuilder, StockScreener};

/// Async wrapper around [`StockScreener`].
///
/// The screener is shared behind a [`Mutex`] and each call is dispatched to
/// the blocking pool.
#[derive(Clone)]
pub struct AsyncStockScreener {
    inner: Arc<Mutex<StockScreener>>,
}

impl AsyncStockScreener {
    /// Build the screener on the blocking pool.
    ///
    /// The default provider owns a blocking HTTP client, which must not be
    /// created on an async worker thread.
    pub async fn new(builder: ScreenerBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || {
            let screener = builder.build()?;
            Ok(Self::from_screener(screener))
        })
        .await
        .map_err(|e| ScreenerError::Runtime(format!("Task join error: {e}")))?
    }

    /// Wrap an already built screener.
    pub fn from_screener(screener: StockScreener) -> Self {
        Self {
            inner: Arc::new(Mutex::new(screener)),
        }
    }

    /// Run a sync screener operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&StockScreener) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let screener = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = screener
                .lock()
                .map_err(|_| ScreenerError::Runtime("screener lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| ScreenerError::Runtime(format!("Task join error: {e}")))?
    }

    /// A request seeded from the wrapped screener's configuration.
    pub async fn request<I, S>(&self, tickers: I) -> Result<ScreenRequest>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tickers: Vec<String> = tickers.into_iter().map(Into::into).collect();
        self.run(move |s| Ok(s.request(tickers))).await
    }

    pub async fn run_screener(&self, request: ScreenRequest) -> Result<ScreenerRun> {
        self.run(move |s| s.run_screener(&request)).await
    }

    pub async fn run_screener_filtered(&self, request: ScreenRequest) -> Result<ScreenerRun> {
        self.run(move |s| s.run_screener_filtered(&request)).await
    }
}
