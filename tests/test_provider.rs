//! Chart provider and response cache, exercised offline through the cache.

mod common;

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use stock_screener::{
    CacheManager, FetchRequest, Interval, Period, PriceHistoryProvider, StockScreener,
    YahooProvider,
};

/// A chart payload with one close per day from 2024-01-02.
fn chart_json(symbol: &str, closes: &[Option<f64>]) -> serde_json::Value {
    let timestamps: Vec<i64> = (0..closes.len() as i64)
        .map(|i| 1_704_205_800 + i * 86_400)
        .collect();
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": symbol, "currency": "USD", "gmtoffset": -18000 },
                "timestamp": timestamps,
                "indicators": { "quote": [{ "close": closes }] }
            }],
            "error": null
        }
    })
}

fn closes_from_returns(returns: &[f64]) -> Vec<Option<f64>> {
    let mut price = 100.0;
    let mut out = vec![Some(price)];
    for r in returns {
        price *= 1.0 + r;
        out.push(Some(price));
    }
    out
}

fn request(instruments: &[&str]) -> FetchRequest {
    FetchRequest {
        instruments: instruments.iter().map(|s| s.to_string()).collect(),
        benchmark: "^GSPC".to_string(),
        period: Period::OneYear,
        interval: Interval::Daily,
    }
}

// ---------------------------------------------------------------------------
// CacheManager
// ---------------------------------------------------------------------------

#[test]
fn cache_round_trips_compressed_json() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(Some(tmp.path().to_path_buf()), true).unwrap();
    let value = chart_json("AAPL", &[Some(1.0), Some(2.0)]);

    let path = cache
        .store("AAPL", Period::OneYear, Interval::Daily, &value)
        .unwrap();
    assert!(path.exists());
    assert!(path.to_string_lossy().ends_with(".json.gz"));

    let loaded = cache.load("AAPL", Period::OneYear, Interval::Daily).unwrap();
    assert_eq!(loaded, Some(value));
    assert_eq!(
        cache.load("AAPL", Period::SixMonths, Interval::Daily).unwrap(),
        None
    );
}

#[test]
fn cache_entries_are_per_day() {
    let tmp = tempfile::tempdir().unwrap();
    let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
    let cache = CacheManager::new(Some(tmp.path().to_path_buf()), true)
        .unwrap()
        .with_day(monday);
    cache
        .store("KO", Period::OneYear, Interval::Daily, &json!({"x": 1}))
        .unwrap();

    let next_day = CacheManager::new(Some(tmp.path().to_path_buf()), true)
        .unwrap()
        .with_day(tuesday);
    assert_eq!(next_day.load("KO", Period::OneYear, Interval::Daily).unwrap(), None);
}

#[test]
fn corrupt_cache_file_is_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(Some(tmp.path().to_path_buf()), true).unwrap();
    let path = cache.entry_path("^GSPC", Period::OneYear, Interval::Daily);
    std::fs::write(&path, b"not gzip").unwrap();

    assert_eq!(cache.load("^GSPC", Period::OneYear, Interval::Daily).unwrap(), None);
    assert!(!path.exists());
}

#[test]
fn clear_empties_the_cache_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("charts");
    let cache = CacheManager::new(Some(dir.clone()), true).unwrap();
    cache
        .store("AAPL", Period::OneYear, Interval::Daily, &json!({}))
        .unwrap();
    cache.clear().unwrap();
    assert!(dir.exists());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

// ---------------------------------------------------------------------------
// YahooProvider (offline)
// ---------------------------------------------------------------------------

#[test]
fn offline_provider_serves_cached_symbols_and_reports_the_rest_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(Some(tmp.path().to_path_buf()), true).unwrap();
    cache
        .store(
            "AAPL",
            Period::OneYear,
            Interval::Daily,
            &chart_json("AAPL", &[Some(185.0), None, Some(187.5), Some(186.0)]),
        )
        .unwrap();
    cache
        .store(
            "^GSPC",
            Period::OneYear,
            Interval::Daily,
            &chart_json("^GSPC", &[Some(4700.0), Some(4710.0), Some(4690.0), Some(4720.0)]),
        )
        .unwrap();
    // an error payload means the symbol does not exist
    cache
        .store(
            "DELISTED",
            Period::OneYear,
            Interval::Daily,
            &json!({"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}}),
        )
        .unwrap();

    let provider = YahooProvider::new(Duration::from_secs(5))
        .unwrap()
        .with_cache(cache);
    let frame = provider.fetch(&request(&["AAPL", "MSFT", "DELISTED"])).unwrap();

    assert_eq!(frame.missing(), vec!["MSFT".to_string(), "DELISTED".to_string()]);
    let aapl = frame.get("AAPL").unwrap();
    assert_eq!(aapl.len(), 3);
    assert_eq!(
        aapl.observations[0].0,
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    );
    assert_eq!(frame.get("^GSPC").unwrap().len(), 4);
}

#[test]
fn offline_screener_runs_from_cache() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(Some(tmp.path().to_path_buf()), true).unwrap();
    let bench = closes_from_returns(&common::BENCHMARK_RETURNS);
    let steady = closes_from_returns(&common::linear_returns(0.3, 0.005));
    cache
        .store("^GSPC", Period::OneYear, Interval::Daily, &chart_json("^GSPC", &bench))
        .unwrap();
    cache
        .store("STEADY", Period::OneYear, Interval::Daily, &chart_json("STEADY", &steady))
        .unwrap();

    let screener = StockScreener::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .unwrap();
    assert!(screener.to_string().contains("provider=yahoo"));

    let run = screener
        .run_screener(&screener.request(["STEADY", "UNCACHED"]))
        .unwrap();
    assert_eq!(run.tickers(), vec!["STEADY"]);
    assert_eq!(run.skipped[0].ticker, "UNCACHED");
    common::assert_close(run.results[0].beta.unwrap(), 0.3, 1e-9);

    let picks = screener
        .run_screener_filtered(&screener.request(["STEADY"]))
        .unwrap();
    assert_eq!(picks.tickers(), vec!["STEADY"]);
}

#[test]
fn offline_screener_without_benchmark_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let screener = StockScreener::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .unwrap();
    let err = screener.run_screener(&screener.request(["AAPL"])).unwrap_err();
    assert!(matches!(
        err,
        stock_screener::ScreenerError::BenchmarkMissing(_)
    ));
    assert_eq!(err.stage(), Some(stock_screener::Stage::Fetch));
}
