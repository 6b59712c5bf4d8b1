//! Shared test fixtures for the screener integration tests.
//!
//! Provides `sample_provider()`, an in-memory provider whose instruments are
//! built from the benchmark's returns with known betas and drifts, so the
//! expected ranking and filter outcome are fixed.

#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use stock_screener::{InMemoryProvider, PriceSeries};

pub const BENCHMARK: &str = "^GSPC";

/// Twenty daily benchmark returns, no two equal.
pub const BENCHMARK_RETURNS: [f64; 20] = [
    0.01, -0.02, 0.015, 0.005, -0.01, 0.012, -0.004, 0.008, -0.015, 0.02, 0.008, -0.016, 0.012,
    0.004, -0.008, 0.0096, -0.0032, 0.0064, -0.012, 0.016,
];

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn day(offset: u64) -> NaiveDate {
    start_date() + Days::new(offset)
}

/// Prices starting at 100 on `start` that compound the given returns daily.
pub fn series_from_returns(ticker: &str, start: NaiveDate, returns: &[f64]) -> PriceSeries {
    let mut price = 100.0;
    let mut observations = vec![(start, price)];
    for (i, r) in returns.iter().enumerate() {
        price *= 1.0 + r;
        observations.push((start + Days::new(i as u64 + 1), price));
    }
    PriceSeries::new(ticker, observations).unwrap()
}

/// Returns of an instrument with the given beta and per-period drift.
pub fn linear_returns(beta: f64, drift: f64) -> Vec<f64> {
    BENCHMARK_RETURNS.iter().map(|b| beta * b + drift).collect()
}

pub fn benchmark_series() -> PriceSeries {
    series_from_returns(BENCHMARK, start_date(), &BENCHMARK_RETURNS)
}

/// Benchmark plus:
///
/// | ticker  | beta | Sharpe (rf 4%/252) |
/// |---------|------|--------------------|
/// | STAR    | 0.2  | ~3.53              |
/// | ROCKET  | 1.5  | ~1.87              |
/// | STEADY  | 0.3  | ~1.55              |
/// | DRIFT   | 0.9  | ~0.72              |
/// | LAGGARD | 0.5  | ~-0.21             |
/// | FLAT    | 0.0  | undefined          |
/// | LATE    | -    | no overlap         |
pub fn sample_provider() -> InMemoryProvider {
    let flat = PriceSeries::new(
        "FLAT",
        (0..=20).map(|i| (day(i), 50.0)).collect(),
    )
    .unwrap();
    let late = series_from_returns("LATE", day(40), &[0.01, -0.01, 0.02]);

    InMemoryProvider::new()
        .with_series(benchmark_series())
        .with_series(series_from_returns("STEADY", start_date(), &linear_returns(0.3, 0.005)))
        .with_series(series_from_returns("ROCKET", start_date(), &linear_returns(1.5, 0.03)))
        .with_series(series_from_returns("DRIFT", start_date(), &linear_returns(0.9, 0.006)))
        .with_series(series_from_returns("LAGGARD", start_date(), &linear_returns(0.5, -0.002)))
        .with_series(series_from_returns("STAR", start_date(), &linear_returns(0.2, 0.008)))
        .with_series(flat)
        .with_series(late)
}

pub const SAMPLE_TICKERS: [&str; 8] = [
    "STEADY", "ROCKET", "DRIFT", "LAGGARD", "STAR", "FLAT", "LATE", "GHOST",
];

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}
