//! Price series aggregation and benchmark alignment.
//!
//! Merges a basket of per-ticker close series into one portfolio-value
//! series (sum of closes per date), outer-joins it with the benchmark
//! series on date, and forward-fills the gaps so both curves can be
//! charted on a shared axis.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// One close observation from the data feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub ticker: String,
    pub date: NaiveDate,
    pub close: f64,
}

/// One row of the aligned comparison series. A column is `None` only
/// before that column's first in-window observation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPoint {
    pub date: NaiveDate,
    pub portfolio_close: Option<f64>,
    pub benchmark_close: Option<f64>,
}

/// Build the aligned comparison series over the inclusive
/// [`start`, `end`] window.
///
/// The date axis is the union of basket and benchmark dates in window,
/// ascending and without duplicates. Basket closes are summed per date
/// across tickers; duplicate benchmark dates collapse last-write-wins.
/// Both columns are forward-filled from their most recent prior
/// observation; leading gaps stay unset.
///
/// An empty in-window basket short-circuits to an empty result, and a
/// benchmark with no in-window data yields a portfolio-only series.
/// Neither condition is an error; both are logged.
pub fn aggregate(
    basket: &[PricePoint],
    benchmark: &[PricePoint],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<AggregatedPoint> {
    let mut portfolio_by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in basket {
        if point.date < start || point.date > end {
            continue;
        }
        *portfolio_by_date.entry(point.date).or_insert(0.0) += point.close;
    }

    if portfolio_by_date.is_empty() {
        warn!(%start, %end, "no portfolio prices in range, returning empty series");
        return Vec::new();
    }

    let mut benchmark_by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in benchmark {
        if point.date < start || point.date > end {
            continue;
        }
        benchmark_by_date.insert(point.date, point.close);
    }

    if benchmark_by_date.is_empty() {
        warn!(%start, %end, "no benchmark prices in range, series will have no benchmark column");
    }

    let dates: BTreeSet<NaiveDate> = portfolio_by_date
        .keys()
        .chain(benchmark_by_date.keys())
        .copied()
        .collect();

    let mut series = Vec::with_capacity(dates.len());
    let mut last_portfolio: Option<f64> = None;
    let mut last_benchmark: Option<f64> = None;

    for date in dates {
        if let Some(&close) = portfolio_by_date.get(&date) {
            last_portfolio = Some(close);
        }
        if let Some(&close) = benchmark_by_date.get(&date) {
            last_benchmark = Some(close);
        }
        series.push(AggregatedPoint {
            date,
            portfolio_close: last_portfolio,
            benchmark_close: last_benchmark,
        });
    }

    series
}
