//! CSV file data feed adapter.
//!
//! File layout under the base directory:
//! - `universe_YYYY-MM-DD.csv` — one snapshot per as-of date, columns
//!   `ticker,sector,roe,roc,roic,earning_yield,dividend_yield,p_vp,volume`
//! - `TICKER.csv` — adjusted close history, columns `date,close`
//!
//! Rows with unparseable dates or numbers are dropped with a logged
//! warning rather than failing the whole file; the pipeline treats a
//! thinner result the same as a feed gap.

use crate::domain::error::CarteiraError;
use crate::domain::security::{Fundamentals, Security};
use crate::domain::series::PricePoint;
use crate::ports::feed_port::FeedPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_BENCHMARK: &str = "IBOV";

pub struct CsvFeedAdapter {
    base_path: PathBuf,
    benchmark_ticker: String,
}

impl CsvFeedAdapter {
    pub fn new(base_path: PathBuf, benchmark_ticker: Option<String>) -> Self {
        Self {
            base_path,
            benchmark_ticker: benchmark_ticker
                .unwrap_or_else(|| DEFAULT_BENCHMARK.to_string()),
        }
    }

    fn universe_path(&self, as_of: NaiveDate) -> PathBuf {
        self.base_path
            .join(format!("universe_{}.csv", as_of.format("%Y-%m-%d")))
    }

    fn price_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}.csv"))
    }

    fn read_price_file(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, CarteiraError> {
        let path = self.price_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| CarteiraError::Feed {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CarteiraError::Feed {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let Some(date_str) = record.get(0) else {
                warn!(%ticker, "price row missing date column, dropped");
                continue;
            };
            let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    warn!(%ticker, date = date_str, "unparseable price date, row dropped");
                    continue;
                }
            };

            if date < start_date || date > end_date {
                continue;
            }

            let close: f64 = match record.get(1).map(str::parse) {
                Some(Ok(v)) => v,
                _ => {
                    warn!(%ticker, %date, "unparseable close value, row dropped");
                    continue;
                }
            };

            points.push(PricePoint {
                ticker: ticker.to_string(),
                date,
                close,
            });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

fn parse_field(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record.get(index).and_then(|v| v.trim().parse().ok())
}

impl FeedPort for CsvFeedAdapter {
    fn fetch_universe(&self, as_of: NaiveDate) -> Result<Vec<Security>, CarteiraError> {
        let path = self.universe_path(as_of);
        let content = fs::read_to_string(&path).map_err(|e| CarteiraError::Feed {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut universe = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CarteiraError::Feed {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let Some(ticker) = record.get(0).map(|t| t.trim().to_uppercase()) else {
                continue;
            };
            if ticker.is_empty() {
                continue;
            }
            let sector = record.get(1).unwrap_or("").trim().to_string();

            let fields: Option<Vec<f64>> = (2..9).map(|i| parse_field(&record, i)).collect();
            let Some(fields) = fields else {
                warn!(%ticker, "universe row with unparseable indicators, dropped");
                continue;
            };

            universe.push(Security {
                ticker,
                sector,
                fundamentals: Fundamentals {
                    roe: fields[0],
                    roc: fields[1],
                    roic: fields[2],
                    earning_yield: fields[3],
                    dividend_yield: fields[4],
                    p_vp: fields[5],
                    volume: fields[6],
                },
            });
        }

        Ok(universe)
    }

    fn fetch_adjusted_price(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, CarteiraError> {
        self.read_price_file(ticker, start_date, end_date)
    }

    fn fetch_benchmark_price(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        ticker: Option<&str>,
    ) -> Result<Vec<PricePoint>, CarteiraError> {
        let ticker = ticker.unwrap_or(&self.benchmark_ticker);
        self.read_price_file(ticker, start_date, end_date)
    }
}
