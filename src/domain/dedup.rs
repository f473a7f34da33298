//! Duplicate share-class filtering.
//!
//! A universe snapshot often lists several share classes of the same
//! company (PETR3, PETR4, ...). The screener keeps exactly one per
//! issuer so a single company cannot occupy multiple portfolio slots.

use crate::domain::security::{Indicator, Security};
use std::collections::HashMap;
use tracing::info;

/// Keep one security per issuer: the one with the highest `tie_break`
/// value in its group (default caller choice is volume). On equal
/// tie-break values the first record encountered wins, so the result is
/// deterministic for any input order. Surviving records keep the
/// relative order of the input.
pub fn deduplicate(records: Vec<Security>, tie_break: Indicator) -> Vec<Security> {
    // index of the current winner per issuer
    let mut winner: HashMap<String, usize> = HashMap::new();

    for (i, record) in records.iter().enumerate() {
        let issuer = record.issuer().to_string();
        match winner.get(&issuer).copied() {
            Some(best) => {
                let best_value = records[best].fundamentals.get(tie_break);
                let value = record.fundamentals.get(tie_break);
                if value.total_cmp(&best_value) == std::cmp::Ordering::Greater {
                    winner.insert(issuer, i);
                }
            }
            None => {
                winner.insert(issuer, i);
            }
        }
    }

    let mut dropped: Vec<&str> = Vec::new();
    let survivors: Vec<Security> = records
        .iter()
        .enumerate()
        .filter(|(i, record)| {
            let keep = winner.get(record.issuer()) == Some(i);
            if !keep {
                dropped.push(&record.ticker);
            }
            keep
        })
        .map(|(_, record)| record.clone())
        .collect();

    if !dropped.is_empty() {
        info!(dropped = ?dropped, tie_break = %tie_break, "filtered duplicate share classes");
    }

    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::security::Fundamentals;

    fn sec(ticker: &str, volume: f64, roe: f64) -> Security {
        Security {
            ticker: ticker.to_string(),
            sector: "Teste".to_string(),
            fundamentals: Fundamentals {
                roe,
                roc: 0.0,
                roic: 0.0,
                earning_yield: 0.0,
                dividend_yield: 0.0,
                p_vp: 0.0,
                volume,
            },
        }
    }

    #[test]
    fn keeps_highest_volume_share_class() {
        let universe = vec![sec("AAAA3", 100.0, 0.1), sec("AAAA4", 50.0, 0.3)];
        let result = deduplicate(universe, Indicator::Volume);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].ticker, "AAAA3");
    }

    #[test]
    fn unique_issuers_pass_through() {
        let universe = vec![sec("AAAA3", 100.0, 0.1), sec("BBBB3", 50.0, 0.3)];
        let result = deduplicate(universe, Indicator::Volume);

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn preserves_input_order_of_survivors() {
        let universe = vec![
            sec("CCCC3", 10.0, 0.0),
            sec("AAAA3", 100.0, 0.0),
            sec("AAAA4", 500.0, 0.0),
            sec("BBBB3", 50.0, 0.0),
        ];
        let result = deduplicate(universe, Indicator::Volume);

        let tickers: Vec<&str> = result.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["CCCC3", "AAAA4", "BBBB3"]);
    }

    #[test]
    fn equal_tie_break_keeps_first_encountered() {
        let universe = vec![sec("AAAA4", 100.0, 0.1), sec("AAAA3", 100.0, 0.3)];
        let result = deduplicate(universe, Indicator::Volume);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].ticker, "AAAA4");
    }

    #[test]
    fn alternate_tie_break_field() {
        let universe = vec![sec("AAAA3", 100.0, 0.1), sec("AAAA4", 50.0, 0.3)];
        let result = deduplicate(universe, Indicator::Roe);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].ticker, "AAAA4");
    }

    #[test]
    fn one_record_per_issuer_with_max_tie_break() {
        let universe = vec![
            sec("AAAA3", 30.0, 0.0),
            sec("AAAA4", 90.0, 0.0),
            sec("AAAA5", 60.0, 0.0),
            sec("BBBB3", 10.0, 0.0),
            sec("BBBB4", 20.0, 0.0),
        ];
        let result = deduplicate(universe, Indicator::Volume);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].ticker, "AAAA4");
        assert_eq!(result[1].ticker, "BBBB4");
    }

    #[test]
    fn empty_universe() {
        let result = deduplicate(vec![], Indicator::Volume);
        assert!(result.is_empty());
    }
}
