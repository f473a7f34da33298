//! Inbound pipeline operations: screen the universe into a portfolio
//! and load the aligned price-history series for a set of tickers.

use crate::domain::dedup::deduplicate;
use crate::domain::error::CarteiraError;
use crate::domain::portfolio::{select_top, Portfolio};
use crate::domain::rank::rank_universe;
use crate::domain::security::Indicator;
use crate::domain::series::{aggregate, AggregatedPoint, PricePoint};
use crate::ports::feed_port::FeedPort;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Parameters for one portfolio generation run. Indicator and field
/// names arrive as strings from the caller (CLI flags or config) and
/// are validated before any data is fetched.
#[derive(Debug, Clone)]
pub struct ScreenRequest {
    pub profitability: String,
    pub discount: String,
    pub as_of: NaiveDate,
    pub count: usize,
    pub tie_break: String,
}

/// Generate the top-`count` portfolio for the request.
///
/// Validation is fail-fast: unknown indicator or tie-break names and a
/// zero count are rejected before the universe is fetched. Duplicate
/// share classes are collapsed per issuer before ranking so one company
/// cannot fill several slots.
pub fn generate_portfolio(
    feed: &dyn FeedPort,
    request: &ScreenRequest,
) -> Result<Portfolio, CarteiraError> {
    let profitability: Indicator = request.profitability.parse().map_err(|_| {
        CarteiraError::MissingIndicator {
            indicator: request.profitability.clone(),
        }
    })?;
    let discount: Indicator = request.discount.parse().map_err(|_| {
        CarteiraError::MissingIndicator {
            indicator: request.discount.clone(),
        }
    })?;
    let tie_break: Indicator = request.tie_break.parse().map_err(|_| {
        CarteiraError::InvalidField {
            field: request.tie_break.clone(),
        }
    })?;
    if request.count == 0 {
        return Err(CarteiraError::InvalidCount { count: 0 });
    }

    let universe = feed.fetch_universe(request.as_of)?;
    if universe.is_empty() {
        return Err(CarteiraError::NoData {
            as_of: request.as_of,
        });
    }
    info!(rows = universe.len(), as_of = %request.as_of, "universe snapshot fetched");

    let deduplicated = deduplicate(universe, tie_break);
    let ranked = rank_universe(deduplicated, profitability, discount);
    select_top(ranked, request.count)
}

/// Load per-ticker adjusted prices plus the benchmark and build the
/// aligned comparison series.
///
/// A ticker whose fetch fails or comes back empty is logged and left
/// out of the basket; the benchmark is handled the same way. Feed gaps
/// degrade the result down to an empty series, never to an error.
pub fn load_price_history(
    feed: &dyn FeedPort,
    tickers: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
    benchmark_ticker: Option<&str>,
) -> Vec<AggregatedPoint> {
    let mut basket: Vec<PricePoint> = Vec::new();

    for ticker in tickers {
        match feed.fetch_adjusted_price(ticker, start_date, end_date) {
            Ok(points) if points.is_empty() => {
                warn!(%ticker, %start_date, %end_date, "no adjusted prices, skipping ticker");
            }
            Ok(points) => {
                info!(%ticker, points = points.len(), "adjusted prices fetched");
                basket.extend(points);
            }
            Err(e) => {
                warn!(%ticker, error = %e, "price fetch failed, skipping ticker");
            }
        }
    }

    let benchmark = match feed.fetch_benchmark_price(start_date, end_date, benchmark_ticker) {
        Ok(points) => points,
        Err(e) => {
            warn!(error = %e, "benchmark fetch failed, series will have no benchmark column");
            Vec::new()
        }
    };

    aggregate(&basket, &benchmark, start_date, end_date)
}
