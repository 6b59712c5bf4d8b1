//! Async wrapper, only built with `--features async`.

#![cfg(feature = "async")]

mod common;

use stock_screener::{AsyncStockScreener, StockScreener};

#[tokio::test(flavor = "current_thread")]
async fn async_runs_match_blocking_runs() {
    let blocking = StockScreener::builder()
        .provider(common::sample_provider())
        .build()
        .unwrap();
    let expected = blocking
        .run_screener(&blocking.request(common::SAMPLE_TICKERS))
        .unwrap();

    let screener = AsyncStockScreener::new(
        StockScreener::builder().provider(common::sample_provider()),
    )
    .await
    .unwrap();
    let request = screener.request(common::SAMPLE_TICKERS).await.unwrap();

    let ranked = screener.run_screener(request.clone()).await.unwrap();
    assert_eq!(ranked, expected);

    let filtered = screener.run_screener_filtered(request).await.unwrap();
    assert_eq!(filtered, expected.filtered());
}

#[tokio::test(flavor = "current_thread")]
async fn run_exposes_the_wrapped_screener() {
    let screener = AsyncStockScreener::from_screener(
        StockScreener::builder()
            .provider(common::sample_provider())
            .build()
            .unwrap(),
    );
    let benchmark = screener
        .run(|s| Ok(s.config().benchmark.clone()))
        .await
        .unwrap();
    assert_eq!(benchmark, "^GSPC");
}
