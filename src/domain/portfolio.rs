//! Portfolio selection from the ranked universe.

use crate::domain::error::CarteiraError;
use crate::domain::rank::RankedSecurity;
use crate::domain::security::Fundamentals;
use tracing::warn;

/// One selected security. `position` is 1-based.
#[derive(Debug, Clone)]
pub struct Position {
    pub position: usize,
    pub ticker: String,
    pub sector: String,
    pub fundamentals: Fundamentals,
    pub score: f64,
}

/// The generated portfolio, ordered best-first. Read-only once built.
#[derive(Debug, Clone)]
pub struct Portfolio {
    pub positions: Vec<Position>,
}

impl Portfolio {
    pub fn tickers(&self) -> Vec<String> {
        self.positions.iter().map(|p| p.ticker.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Take the top `count` securities by combined score, descending.
///
/// The sort is stable, so equal scores keep their ranking order. A
/// `count` larger than the universe is capped at the universe size with
/// a logged warning; `count == 0` is an error.
pub fn select_top(
    mut ranked: Vec<RankedSecurity>,
    count: usize,
) -> Result<Portfolio, CarteiraError> {
    if count == 0 {
        return Err(CarteiraError::InvalidCount { count });
    }

    if count > ranked.len() {
        warn!(
            requested = count,
            universe = ranked.len(),
            "portfolio size capped at universe size"
        );
    }

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let positions = ranked
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, r)| Position {
            position: i + 1,
            ticker: r.security.ticker,
            sector: r.security.sector,
            fundamentals: r.security.fundamentals,
            score: r.score,
        })
        .collect();

    Ok(Portfolio { positions })
}
