//! Qualitative remarks derived from beta and Sharpe ratio.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetaTier {
    Defensive,
    MarketNeutral,
    Aggressive,
    Insufficient,
}

impl BetaTier {
    /// `< 0.8` defensive, `0.8..=1.2` market-neutral, above aggressive.
    pub fn classify(beta: Option<f64>) -> Self {
        match beta.filter(|b| b.is_finite()) {
            None => BetaTier::Insufficient,
            Some(b) if b < 0.8 => BetaTier::Defensive,
            Some(b) if b <= 1.2 => BetaTier::MarketNeutral,
            Some(_) => BetaTier::Aggressive,
        }
    }
}

impl fmt::Display for BetaTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BetaTier::Defensive => "Defensive or low volatility",
            BetaTier::MarketNeutral => "Market-neutral behavior",
            BetaTier::Aggressive => "High volatility / aggressive",
            BetaTier::Insufficient => "Insufficient data for beta",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharpeTier {
    Suboptimal,
    Acceptable,
    Excellent,
    Insufficient,
}

impl SharpeTier {
    /// `< 1.0` suboptimal, `1.0..2.0` acceptable, `>= 2.0` excellent.
    pub fn classify(sharpe: Option<f64>) -> Self {
        match sharpe.filter(|s| s.is_finite()) {
            None => SharpeTier::Insufficient,
            Some(s) if s < 1.0 => SharpeTier::Suboptimal,
            Some(s) if s < 2.0 => SharpeTier::Acceptable,
            Some(_) => SharpeTier::Excellent,
        }
    }
}

impl fmt::Display for SharpeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SharpeTier::Suboptimal => "Suboptimal risk-adjusted return",
            SharpeTier::Acceptable => "Acceptable performance",
            SharpeTier::Excellent => "Excellent risk-adjusted return",
            SharpeTier::Insufficient => "Insufficient data for Sharpe ratio",
        };
        f.write_str(text)
    }
}

/// `"<beta remark>; <sharpe remark>"`.
pub fn remark(beta: Option<f64>, sharpe: Option<f64>) -> String {
    format!(
        "{}; {}",
        BetaTier::classify(beta),
        SharpeTier::classify(sharpe)
    )
}
