//! Ratio rows, ranking by Sharpe ratio and the low-beta/high-Sharpe filter.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{AlignedPair, RatioResult, SkippedInstrument, COLUMNS};
use crate::ratios::{compute_ratios, RatioParams};
use crate::remarks::remark;

pub const FILTER_MAX_BETA: f64 = 1.0;
pub const FILTER_MIN_SHARPE: f64 = 1.2;

/// One row per pair, in the order given.
pub fn screen<'a, I>(pairs: I, params: &RatioParams) -> Vec<RatioResult>
where
    I: IntoIterator<Item = &'a AlignedPair>,
{
    pairs
        .into_iter()
        .map(|pair| {
            let ratios = compute_ratios(pair, params);
            let text = remark(ratios.beta, ratios.sharpe);
            RatioResult::new(pair.ticker.clone(), ratios, text)
        })
        .collect()
}

/// Sort by Sharpe ratio, highest first. Undefined Sharpe sorts last and
/// equal values keep their original relative order.
pub fn rank(mut results: Vec<RatioResult>) -> Vec<RatioResult> {
    results.sort_by(|a, b| compare_sharpe_desc(a.sharpe, b.sharpe));
    results
}

fn compare_sharpe_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    let key = |s: Option<f64>| s.unwrap_or(f64::NEG_INFINITY);
    key(b).total_cmp(&key(a))
}

/// `beta < 1.0 && sharpe > 1.2`; an undefined value never passes.
pub fn passes_filter(result: &RatioResult) -> bool {
    matches!(
        (result.beta, result.sharpe),
        (Some(beta), Some(sharpe)) if beta < FILTER_MAX_BETA && sharpe > FILTER_MIN_SHARPE
    )
}

// ---------------------------------------------------------------------------
// ScreenerRun
// ---------------------------------------------------------------------------

/// The outcome of one screener invocation.
///
/// `results` is ranked by descending Sharpe ratio. `skipped` lists requested
/// tickers the provider had no prices for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerRun {
    pub results: Vec<RatioResult>,
    pub skipped: Vec<SkippedInstrument>,
    pub filtered: bool,
}

impl ScreenerRun {
    /// Rank `results` into a new run.
    pub fn ranked(results: Vec<RatioResult>, skipped: Vec<SkippedInstrument>) -> Self {
        Self {
            results: rank(results),
            skipped,
            filtered: false,
        }
    }

    /// The subset of this run that passes [`passes_filter`], order preserved.
    pub fn filtered(&self) -> Self {
        Self {
            results: self
                .results
                .iter()
                .filter(|r| passes_filter(r))
                .cloned()
                .collect(),
            skipped: self.skipped.clone(),
            filtered: true,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn tickers(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.ticker.as_str()).collect()
    }

    pub fn get(&self, ticker: &str) -> Option<&RatioResult> {
        self.results.iter().find(|r| r.ticker == ticker)
    }

    /// The result rows as a JSON array keyed by column label.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.results)?)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for ScreenerRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:>8} {:>13} {:>13} {:>8} {:>13}  {}",
            COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4], COLUMNS[5], COLUMNS[6]
        )?;
        for r in &self.results {
            writeln!(
                f,
                "{:<8} {:>8} {:>13} {:>13} {:>8} {:>13}  {}",
                r.ticker,
                cell(r.beta),
                cell(r.sharpe),
                cell(r.sortino),
                cell(r.alpha),
                cell(r.treynor),
                r.remark
            )?;
        }
        if !self.skipped.is_empty() {
            let names: Vec<&str> = self.skipped.iter().map(|s| s.ticker.as_str()).collect();
            writeln!(f, "Skipped (no data): {}", names.join(", "))?;
        }
        Ok(())
    }
}
