//! Candidate balance scoring. Lower is better.
//!
//! Two additive terms: how far the candidate leaves each touched color's
//! cumulative net from zero, and (for the frequency-balanced variant) how
//! wide it leaves the appearance spread. The skew term carries a 10x
//! weight so it dominates tie-breaking once net balance is close. Both
//! functions are pure and never mutate the caller's tallies.

use crate::catalog::StockChangeInstance;
use crate::core::{Color, ColorMap};

/// Net-convergence term: sum of `abs(net + delta)` over touched colors.
#[must_use]
pub fn balance_score(instance: &StockChangeInstance, net: &ColorMap<i64>) -> i64 {
    instance
        .touched()
        .map(|(color, delta)| (net[color] + i64::from(delta)).abs())
        .sum()
}

/// Frequency-skew term: apply the instance's touches to a simulated copy
/// of the tally, then weight the resulting max-min spread.
#[must_use]
pub fn skew_penalty(
    instance: &StockChangeInstance,
    frequency: &ColorMap<u32>,
    palette: &[Color],
) -> i64 {
    let simulated = ColorMap::new(|c| {
        frequency[c] + u32::from(instance.delta(c) != 0)
    });

    let spread = simulated.max_over(palette) - simulated.min_over(palette);
    10 * i64::from(spread)
}
