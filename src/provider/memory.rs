use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{PriceFrame, PriceSeries};
use crate::provider::{FetchRequest, PriceHistoryProvider};

/// Serves fixed price series, ignoring period and interval.
///
/// Useful for tests and for screening data that was obtained elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: BTreeMap<String, PriceSeries>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.ticker.clone(), series);
    }
}

impl PriceHistoryProvider for InMemoryProvider {
    fn fetch(&self, request: &FetchRequest) -> Result<PriceFrame> {
        let symbols = request.symbols();
        let mut frame = PriceFrame::new(symbols.clone());
        for symbol in &symbols {
            if let Some(series) = self.series.get(symbol) {
                frame.insert(series.clone());
            }
        }
        Ok(frame)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
