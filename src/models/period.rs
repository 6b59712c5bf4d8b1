use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScreenerError;

// ---------------------------------------------------------------------------
// Period — how far back the price history reaches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    /// The range code used by the chart API.
    pub fn code(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Period {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let period = match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Period::OneDay,
            "5d" => Period::FiveDays,
            "1mo" => Period::OneMonth,
            "3mo" => Period::ThreeMonths,
            "6mo" => Period::SixMonths,
            "1y" => Period::OneYear,
            "2y" => Period::TwoYears,
            "5y" => Period::FiveYears,
            "10y" => Period::TenYears,
            "ytd" => Period::YearToDate,
            "max" => Period::Max,
            other => {
                return Err(ScreenerError::InvalidArgument(format!(
                    "unknown period: {other}"
                )))
            }
        };
        Ok(period)
    }
}

// ---------------------------------------------------------------------------
// Interval — sampling frequency of the price history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "5d")]
    FiveDay,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
    #[serde(rename = "3mo")]
    Quarterly,
}

impl Interval {
    pub fn code(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::FiveDay => "5d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
            Interval::Quarterly => "3mo",
        }
    }

    /// Annualization constant for returns sampled at this interval.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Interval::Daily => 252,
            Interval::FiveDay => 50,
            Interval::Weekly => 52,
            Interval::Monthly => 12,
            Interval::Quarterly => 4,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let interval = match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Interval::Daily,
            "5d" => Interval::FiveDay,
            "1wk" => Interval::Weekly,
            "1mo" => Interval::Monthly,
            "3mo" => Interval::Quarterly,
            other => {
                return Err(ScreenerError::InvalidArgument(format!(
                    "unknown interval: {other}"
                )))
            }
        };
        Ok(interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_codes_parse_back() {
        for period in [Period::OneYear, Period::YearToDate, Period::TenYears] {
            assert_eq!(period.code().parse::<Period>().unwrap(), period);
        }
        assert!("3y".parse::<Period>().is_err());
    }

    #[test]
    fn interval_codes_parse_back() {
        assert_eq!("1WK".parse::<Interval>().unwrap(), Interval::Weekly);
        assert_eq!(Interval::Monthly.to_string(), "1mo");
        assert!("1h".parse::<Interval>().is_err());
    }
}
