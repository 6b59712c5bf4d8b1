//! Beta, Sharpe, Sortino, CAPM alpha and Treynor for one aligned pair.

use crate::config::DEFAULT_ANNUAL_RISK_FREE_RATE;
use crate::models::{AlignedPair, Ratios};
use crate::stats::{covariance, is_constant, mean, std_dev, variance};

/// Inputs that are the same for every instrument in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioParams {
    /// Risk-free rate per sampling period.
    pub risk_free_rate: f64,
    /// Annualization constant matching the sampling interval.
    pub periods_per_year: u32,
}

impl Default for RatioParams {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_ANNUAL_RISK_FREE_RATE / 252.0,
            periods_per_year: 252,
        }
    }
}

/// Compute all five ratios for `pair`.
///
/// Ratios whose denominator vanishes come back as `None`:
/// beta when the benchmark has no variance, Sharpe when the instrument has
/// none, Sortino when no period falls below the risk-free rate (or those that
/// do are all equal), alpha when beta is undefined and Treynor when beta is
/// undefined or zero. An empty pair yields all `None`, and so does any ratio
/// that does not come out finite (returns overflowing on extreme prices).
pub fn compute_ratios(pair: &AlignedPair, params: &RatioParams) -> Ratios {
    let r = &pair.instrument;
    let b = &pair.benchmark;
    let rf = params.risk_free_rate;
    let annualize = params.periods_per_year as f64;

    let (Some(mean_r), Some(mean_b)) = (mean(r), mean(b)) else {
        return Ratios::undefined();
    };

    let excess: Vec<f64> = r.iter().map(|x| x - rf).collect();
    let downside: Vec<f64> = excess.iter().copied().filter(|x| *x < 0.0).collect();
    let mean_excess = mean_r - rf;

    let beta = if is_constant(b) {
        None
    } else {
        match (covariance(r, b), variance(b)) {
            (Some(cov), Some(var)) if var > 0.0 => Some(cov / var),
            _ => None,
        }
        .filter(|v| v.is_finite())
    };

    let sharpe = if is_constant(r) {
        None
    } else {
        std_dev(r).filter(|s| *s > 0.0).map(|s| mean_excess / s)
    };

    let sortino = if is_constant(&downside) {
        None
    } else {
        std_dev(&downside)
            .filter(|s| *s > 0.0)
            .map(|s| mean_excess / s)
    };

    let alpha = beta.map(|beta| {
        let expected = rf + beta * (mean_b - rf);
        (mean_r - expected) * annualize
    });

    let treynor = beta
        .filter(|beta| *beta != 0.0)
        .map(|beta| mean_excess * annualize / beta);

    Ratios {
        beta: beta.filter(|v| v.is_finite()),
        sharpe: sharpe.filter(|v| v.is_finite()),
        sortino: sortino.filter(|v| v.is_finite()),
        alpha: alpha.filter(|v| v.is_finite()),
        treynor: treynor.filter(|v| v.is_finite()),
    }
}
