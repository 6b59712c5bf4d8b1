//! Sources of historical closing prices.

pub mod memory;
pub mod yahoo;

pub use memory::InMemoryProvider;
pub use yahoo::YahooProvider;

use crate::error::Result;
use crate::models::{Interval, Period, PriceFrame};

/// What to fetch for one screener run: every instrument plus the benchmark,
/// over the same period and interval.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub instruments: Vec<String>,
    pub benchmark: String,
    pub period: Period,
    pub interval: Interval,
}

impl FetchRequest {
    /// Instruments followed by the benchmark, each identifier once.
    pub fn symbols(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.instruments.len() + 1);
        for symbol in self.instruments.iter().chain(std::iter::once(&self.benchmark)) {
            if !out.contains(symbol) {
                out.push(symbol.clone());
            }
        }
        out
    }
}

/// A batch price-history source.
///
/// Implementations fetch every symbol of the request in one call. A symbol
/// with no data is left out of the returned frame (and so reported by
/// [`PriceFrame::missing`]); a failure that affects the whole batch is an
/// error.
pub trait PriceHistoryProvider: Send {
    fn fetch(&self, request: &FetchRequest) -> Result<PriceFrame>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "provider"
    }
}

impl<P: PriceHistoryProvider + ?Sized> PriceHistoryProvider for Box<P> {
    fn fetch(&self, request: &FetchRequest) -> Result<PriceFrame> {
        (**self).fetch(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
