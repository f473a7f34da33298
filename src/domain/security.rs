//! Security universe representation.
//!
//! Fundamentals use a fixed schema rather than a loose column map: every
//! indicator the screener can rank by is a named `f64` field, and
//! [`Indicator`] is the lookup path for caller-supplied field names.

use std::fmt;
use std::str::FromStr;

/// Length of the issuer prefix shared by all share classes of a company
/// (e.g. PETR3 and PETR4 both belong to issuer PETR).
pub const ISSUER_PREFIX_LEN: usize = 4;

/// Fundamental indicators known to the screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Roe,
    Roc,
    Roic,
    EarningYield,
    DividendYield,
    PVp,
    Volume,
}

impl Indicator {
    /// Indicators usable as the profitability leg of the rank sum.
    pub const PROFITABILITY: [Indicator; 3] =
        [Indicator::Roe, Indicator::Roc, Indicator::Roic];

    /// Indicators usable as the discount leg of the rank sum.
    pub const DISCOUNT: [Indicator; 3] = [
        Indicator::EarningYield,
        Indicator::DividendYield,
        Indicator::PVp,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Indicator::Roe => "roe",
            Indicator::Roc => "roc",
            Indicator::Roic => "roic",
            Indicator::EarningYield => "earning_yield",
            Indicator::DividendYield => "dividend_yield",
            Indicator::PVp => "p_vp",
            Indicator::Volume => "volume",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown indicator name. Callers map this to the domain error that fits
/// the boundary (tie-break field vs. ranking indicator).
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown indicator: {0}")]
pub struct UnknownIndicator(pub String);

impl FromStr for Indicator {
    type Err = UnknownIndicator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "roe" => Ok(Indicator::Roe),
            "roc" => Ok(Indicator::Roc),
            "roic" => Ok(Indicator::Roic),
            "earning_yield" => Ok(Indicator::EarningYield),
            "dividend_yield" => Ok(Indicator::DividendYield),
            "p_vp" => Ok(Indicator::PVp),
            "volume" => Ok(Indicator::Volume),
            _ => Err(UnknownIndicator(s.trim().to_string())),
        }
    }
}

/// Fundamental indicator values for one security.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fundamentals {
    pub roe: f64,
    pub roc: f64,
    pub roic: f64,
    pub earning_yield: f64,
    pub dividend_yield: f64,
    pub p_vp: f64,
    pub volume: f64,
}

impl Fundamentals {
    pub const fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Roe => self.roe,
            Indicator::Roc => self.roc,
            Indicator::Roic => self.roic,
            Indicator::EarningYield => self.earning_yield,
            Indicator::DividendYield => self.dividend_yield,
            Indicator::PVp => self.p_vp,
            Indicator::Volume => self.volume,
        }
    }
}

/// One row of the universe snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Security {
    pub ticker: String,
    pub sector: String,
    pub fundamentals: Fundamentals,
}

impl Security {
    /// Issuer identifier: fixed-length ticker prefix grouping the share
    /// classes of one company. Short tickers are their own issuer.
    pub fn issuer(&self) -> &str {
        let end = self
            .ticker
            .char_indices()
            .nth(ISSUER_PREFIX_LEN)
            .map_or(self.ticker.len(), |(i, _)| i);
        &self.ticker[..end]
    }
}
