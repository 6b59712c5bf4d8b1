use std::fmt;

/// Which part of a screener run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Retrieving price history from the provider.
    Fetch,
    /// Turning fetched prices into ratios.
    Compute,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Compute => write!(f, "compute"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Price data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Benchmark {0} returned no price data")]
    BenchmarkMissing(String),

    #[error("Screener computation failed: {0}")]
    Compute(String),

    #[error("Async runtime error: {0}")]
    Runtime(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ScreenerError {
    /// The stage a run-level failure belongs to, if it is tied to one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ScreenerError::Http(_)
            | ScreenerError::DataUnavailable(_)
            | ScreenerError::BenchmarkMissing(_) => Some(Stage::Fetch),
            ScreenerError::Compute(_) => Some(Stage::Compute),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
