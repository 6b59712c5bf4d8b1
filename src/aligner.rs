//! Price-to-return conversion and date alignment against the benchmark.
//!
//! Returns are simple percentage changes between consecutive observations of
//! a series. Alignment is an inner join on date: a date missing on either
//! side is dropped, never interpolated or forward-filled.

use std::cmp::Ordering;

use crate::models::{AlignedPair, PriceSeries, ReturnSeries};

/// Period-over-period fractional returns, `price[t] / price[t-1] - 1`.
///
/// The first observation has no prior period and produces no return.
pub fn returns(prices: &PriceSeries) -> ReturnSeries {
    let observations = prices
        .observations
        .windows(2)
        .map(|w| (w[1].0, w[1].1 / w[0].1 - 1.0))
        .collect();
    ReturnSeries {
        ticker: prices.ticker.clone(),
        observations,
    }
}

/// Keep the dates present in both series, in chronological order.
pub fn align(instrument: &ReturnSeries, benchmark: &ReturnSeries) -> AlignedPair {
    let capacity = instrument.len().min(benchmark.len());
    let mut dates = Vec::with_capacity(capacity);
    let mut inst = Vec::with_capacity(capacity);
    let mut bench = Vec::with_capacity(capacity);

    let (mut i, mut j) = (0usize, 0usize);
    while i < instrument.observations.len() && j < benchmark.observations.len() {
        let (di, ri) = instrument.observations[i];
        let (dj, rj) = benchmark.observations[j];
        match di.cmp(&dj) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dates.push(di);
                inst.push(ri);
                bench.push(rj);
                i += 1;
                j += 1;
            }
        }
    }

    AlignedPair {
        ticker: instrument.ticker.clone(),
        dates,
        instrument: inst,
        benchmark: bench,
    }
}

/// [`returns`] on both sides followed by [`align`].
pub fn align_prices(instrument: &PriceSeries, benchmark: &PriceSeries) -> AlignedPair {
    align(&returns(instrument), &returns(benchmark))
}
