//! Market data feed port trait.

use crate::domain::error::CarteiraError;
use crate::domain::security::Security;
use crate::domain::series::PricePoint;
use chrono::NaiveDate;

/// Contract with the external fundamentals/price feed.
///
/// An empty result means "no data" and is handled by the pipeline as a
/// non-fatal, logged condition; errors are reserved for the feed itself
/// misbehaving.
pub trait FeedPort {
    /// Universe snapshot with fundamentals as of the given date.
    fn fetch_universe(&self, as_of: NaiveDate) -> Result<Vec<Security>, CarteiraError>;

    /// Split/dividend-adjusted close history for one ticker.
    fn fetch_adjusted_price(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, CarteiraError>;

    /// Benchmark index close history. `ticker` overrides the feed's
    /// default benchmark.
    fn fetch_benchmark_price(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        ticker: Option<&str>,
    ) -> Result<Vec<PricePoint>, CarteiraError>;
}
