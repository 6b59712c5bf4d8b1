use serde::{Deserialize, Serialize};

/// Column labels shared by the ranked and filtered views.
pub const COLUMNS: [&str; 7] = [
    "Ticker",
    "Beta",
    "Sharpe Ratio",
    "Sortino Ratio",
    "Alpha",
    "Treynor Ratio",
    "Remark",
];

// ---------------------------------------------------------------------------
// Ratios — the five statistics for one aligned pair
// ---------------------------------------------------------------------------

/// Risk/return statistics for one instrument. `None` marks a ratio that is
/// undefined for the data (zero variance, zero beta, no overlap).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    pub beta: Option<f64>,
    pub sharpe: Option<f64>,
    pub sortino: Option<f64>,
    pub alpha: Option<f64>,
    pub treynor: Option<f64>,
}

impl Ratios {
    pub fn undefined() -> Self {
        Self::default()
    }

    pub fn is_undefined(&self) -> bool {
        self.beta.is_none()
            && self.sharpe.is_none()
            && self.sortino.is_none()
            && self.alpha.is_none()
            && self.treynor.is_none()
    }
}

// ---------------------------------------------------------------------------
// RatioResult — one row of the screener table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Beta")]
    pub beta: Option<f64>,
    #[serde(rename = "Sharpe Ratio")]
    pub sharpe: Option<f64>,
    #[serde(rename = "Sortino Ratio")]
    pub sortino: Option<f64>,
    #[serde(rename = "Alpha")]
    pub alpha: Option<f64>,
    #[serde(rename = "Treynor Ratio")]
    pub treynor: Option<f64>,
    #[serde(rename = "Remark")]
    pub remark: String,
}

impl RatioResult {
    pub fn new(ticker: impl Into<String>, ratios: Ratios, remark: String) -> Self {
        Self {
            ticker: ticker.into(),
            beta: ratios.beta,
            sharpe: ratios.sharpe,
            sortino: ratios.sortino,
            alpha: ratios.alpha,
            treynor: ratios.treynor,
            remark,
        }
    }

    pub fn ratios(&self) -> Ratios {
        Ratios {
            beta: self.beta,
            sharpe: self.sharpe,
            sortino: self.sortino,
            alpha: self.alpha,
            treynor: self.treynor,
        }
    }
}

// ---------------------------------------------------------------------------
// SkippedInstrument — a requested ticker that produced no row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedInstrument {
    pub ticker: String,
    pub reason: String,
}
