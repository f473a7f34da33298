//! Rank-sum scoring over the security universe.
//!
//! Both legs use fractional ranking, ascending: the lowest raw value
//! receives rank 1 and tied values share the average of the ranks they
//! jointly occupy. The combined score is the sum of the two ranks, and
//! selection treats a *higher* score as better for both legs, with no
//! inversion of discount indicators. That direction is inherited from
//! the reference behavior and is kept deliberately — see DESIGN.md
//! before "fixing" it.

use crate::domain::security::{Indicator, Security};

/// A security with its two leg ranks and combined score.
#[derive(Debug, Clone)]
pub struct RankedSecurity {
    pub security: Security,
    pub profitability_rank: f64,
    pub discount_rank: f64,
    pub score: f64,
}

/// Fractional ranks (1-based, ascending) of `values`.
///
/// Ties share the average of the positions they occupy; ordering of
/// incomparable values falls back to [`f64::total_cmp`] so the result
/// is deterministic for any input.
pub fn fractional_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // positions i..=j are tied; average of 1-based ranks i+1..=j+1
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }

    ranks
}

/// Rank the whole universe by both legs and attach the combined score.
/// Output order matches the input order.
pub fn rank_universe(
    records: Vec<Security>,
    profitability: Indicator,
    discount: Indicator,
) -> Vec<RankedSecurity> {
    let profitability_values: Vec<f64> = records
        .iter()
        .map(|s| s.fundamentals.get(profitability))
        .collect();
    let discount_values: Vec<f64> = records
        .iter()
        .map(|s| s.fundamentals.get(discount))
        .collect();

    let profitability_ranks = fractional_ranks(&profitability_values);
    let discount_ranks = fractional_ranks(&discount_values);

    records
        .into_iter()
        .zip(profitability_ranks.into_iter().zip(discount_ranks))
        .map(|(security, (profitability_rank, discount_rank))| RankedSecurity {
            security,
            profitability_rank,
            discount_rank,
            score: profitability_rank + discount_rank,
        })
        .collect()
}
