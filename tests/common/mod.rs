#![allow(dead_code)]

use carteira::domain::error::CarteiraError;
use carteira::domain::security::{Fundamentals, Security};
use carteira::domain::series::PricePoint;
use carteira::ports::feed_port::FeedPort;
use chrono::NaiveDate;
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_security(
    ticker: &str,
    sector: &str,
    roe: f64,
    earning_yield: f64,
    volume: f64,
) -> Security {
    Security {
        ticker: ticker.to_string(),
        sector: sector.to_string(),
        fundamentals: Fundamentals {
            roe,
            roc: roe,
            roic: roe,
            earning_yield,
            dividend_yield: earning_yield,
            p_vp: 1.0,
            volume,
        },
    }
}

pub fn make_point(ticker: &str, date_str: &str, close: f64) -> PricePoint {
    PricePoint {
        ticker: ticker.to_string(),
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        close,
    }
}

/// Daily close series for one ticker, `days` points from `start`.
pub fn generate_points(ticker: &str, start: &str, days: usize, base: f64) -> Vec<PricePoint> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (0..days)
        .map(|i| PricePoint {
            ticker: ticker.to_string(),
            date: start + chrono::Duration::days(i as i64),
            close: base + i as f64,
        })
        .collect()
}

pub struct MockFeed {
    pub universe: Vec<Security>,
    pub prices: HashMap<String, Vec<PricePoint>>,
    pub benchmark: Vec<PricePoint>,
    pub errors: HashMap<String, String>,
    pub universe_error: Option<String>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self {
            universe: Vec::new(),
            prices: HashMap::new(),
            benchmark: Vec::new(),
            errors: HashMap::new(),
            universe_error: None,
        }
    }

    pub fn with_universe(mut self, universe: Vec<Security>) -> Self {
        self.universe = universe;
        self
    }

    pub fn with_prices(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.prices.insert(ticker.to_string(), points);
        self
    }

    pub fn with_benchmark(mut self, points: Vec<PricePoint>) -> Self {
        self.benchmark = points;
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn with_universe_error(mut self, reason: &str) -> Self {
        self.universe_error = Some(reason.to_string());
        self
    }
}

impl FeedPort for MockFeed {
    fn fetch_universe(&self, _as_of: NaiveDate) -> Result<Vec<Security>, CarteiraError> {
        if let Some(reason) = &self.universe_error {
            return Err(CarteiraError::Feed {
                reason: reason.clone(),
            });
        }
        Ok(self.universe.clone())
    }

    fn fetch_adjusted_price(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, CarteiraError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(CarteiraError::Feed {
                reason: reason.clone(),
            });
        }
        Ok(self
            .prices
            .get(ticker)
            .map(|points| {
                points
                    .iter()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn fetch_benchmark_price(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        _ticker: Option<&str>,
    ) -> Result<Vec<PricePoint>, CarteiraError> {
        Ok(self
            .benchmark
            .iter()
            .filter(|p| p.date >= start_date && p.date <= end_date)
            .cloned()
            .collect())
    }
}
