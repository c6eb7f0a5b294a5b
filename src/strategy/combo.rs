//! Three-leg combination search.
//!
//! Filters the day's fixtures to the tight odds band, enumerates every
//! 3-fixture combination, keeps those whose combined odds land in the
//! target window, and picks the one with the lowest sum of odds.
//!
//! Enumeration is exhaustive. A day carries at most a few dozen fixtures,
//! so C(n, 3) stays in the low thousands; `max_combinations` caps it if
//! that assumption ever breaks.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::SelectorConfig;
use crate::types::{Fixture, COMBO_LEGS};

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// One qualifying combination, by position in the odds-band subset.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboCandidate {
    pub indices: [usize; COMBO_LEGS],
    /// Product of the three odds (the combined odds of the bet).
    pub product: Decimal,
    /// Sum of the three odds (the ranking key, lower wins).
    pub total: Decimal,
}

/// Result of a combination search pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboSearch {
    /// Fewer than three fixtures in the odds band.
    TooFewFixtures { in_band: usize },
    /// The band is larger than the configured enumeration budget.
    OverBudget { combinations: u64, budget: u64 },
    /// Enumerated everything; no product landed in the window.
    NoneQualified { combinations: u64 },
    /// Best combination, legs already ordered by kick-off time.
    Found {
        fixtures: [Fixture; COMBO_LEGS],
        combined_odds: Decimal,
        total: Decimal,
        combinations: u64,
        qualified: usize,
    },
}

/// Fixtures whose odds fall in the closed combo band.
pub fn combo_band<'a>(fixtures: &'a [Fixture], config: &SelectorConfig) -> Vec<&'a Fixture> {
    fixtures
        .iter()
        .filter(|fx| {
            let odds = fx.probability.value();
            odds >= config.combo_min_odds && odds <= config.combo_max_odds
        })
        .collect()
}

/// Number of unordered 3-element subsets of `n` items.
pub fn combination_count(n: usize) -> u64 {
    if n < COMBO_LEGS {
        return 0;
    }
    let n = n as u64;
    n * (n - 1) * (n - 2) / 6
}

/// Whether a combined-odds product lies in `(min_product, max_product]`.
pub fn product_in_window(product: Decimal, config: &SelectorConfig) -> bool {
    product > config.min_product && product <= config.max_product
}

/// Enumerate all triples `i < j < k` and keep the qualifying ones.
///
/// Candidates come out in lexicographic index order.
pub fn candidates(band: &[&Fixture], config: &SelectorConfig) -> Vec<ComboCandidate> {
    let n = band.len();
    let mut out = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let (a, b, c) = (
                    band[i].probability.value(),
                    band[j].probability.value(),
                    band[k].probability.value(),
                );
                let Some(product) = a.checked_mul(b).and_then(|ab| ab.checked_mul(c)) else {
                    continue;
                };
                if !product_in_window(product, config) {
                    continue;
                }
                out.push(ComboCandidate {
                    indices: [i, j, k],
                    product,
                    total: a + b + c,
                });
            }
        }
    }

    out
}

/// Lowest `total` wins; on an exact tie the earliest candidate is kept.
pub fn best_candidate(candidates: &[ComboCandidate]) -> Option<&ComboCandidate> {
    candidates.iter().min_by_key(|c| c.total)
}

/// Run the full combination search over one day's fixtures.
pub fn search(fixtures: &[Fixture], config: &SelectorConfig) -> ComboSearch {
    let band = combo_band(fixtures, config);
    if band.len() < COMBO_LEGS {
        debug!(in_band = band.len(), "Too few fixtures for a combo");
        return ComboSearch::TooFewFixtures { in_band: band.len() };
    }

    let combinations = combination_count(band.len());
    if let Some(budget) = config.max_combinations {
        if combinations > budget {
            warn!(
                in_band = band.len(),
                combinations,
                budget,
                "Combination budget exceeded, skipping combo search"
            );
            return ComboSearch::OverBudget { combinations, budget };
        }
    }

    let qualifying = candidates(&band, config);
    let Some(best) = best_candidate(&qualifying) else {
        debug!(in_band = band.len(), combinations, "No combination in target window");
        return ComboSearch::NoneQualified { combinations };
    };

    let mut legs = best.indices.map(|idx| band[idx].clone());
    legs.sort_by(|a, b| a.cmp_by_time(b));

    debug!(
        combinations,
        qualified = qualifying.len(),
        product = %best.product,
        total = %best.total,
        "Best combo found"
    );

    ComboSearch::Found {
        fixtures: legs,
        combined_odds: best.product,
        total: best.total,
        combinations,
        qualified: qualifying.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
