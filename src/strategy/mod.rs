//! Bet-of-the-day selection: combo search with a single-fixture fallback.
//!
//! The selector is a pure function of the day's fixtures. It never fails;
//! "nothing qualified" comes back as `BetSelection::NoBet`.

pub mod combo;
pub mod single;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing::{debug, info};

use crate::types::{BetSelection, Fixture};
use combo::ComboSearch;

// ---------------------------------------------------------------------------
// Configuration (defaults, overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Odds bands and windows used by the selector.
///
/// All bands are closed intervals except the product window, which is
/// `(min_product, max_product]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Lower bound of the odds band for combo legs.
    pub combo_min_odds: Decimal,
    /// Upper bound of the odds band for combo legs.
    pub combo_max_odds: Decimal,
    /// Combined odds must be strictly above this.
    pub min_product: Decimal,
    /// Combined odds must be at most this.
    pub max_product: Decimal,
    pub single_min_odds: Decimal,
    pub single_max_odds: Decimal,
    /// Cap on enumerated triples; above it the combo search is skipped.
    pub max_combinations: Option<u64>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            combo_min_odds: dec!(1.2),
            combo_max_odds: dec!(1.39),
            min_product: dec!(1.8),
            max_product: dec!(2.1),
            single_min_odds: dec!(1.2),
            single_max_odds: dec!(1.6),
            max_combinations: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Picks the bet of the day for one date's fixtures.
#[derive(Debug, Clone, Default)]
pub struct BetSelector {
    config: SelectorConfig,
}

impl BetSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Access the selector configuration.
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Run the selection pipeline.
    ///
    /// Steps:
    /// 1. Combo search over the tight band; lowest sum of odds wins.
    /// 2. If no combo qualifies, the lowest-odds fixture in the wide band.
    /// 3. Otherwise `NoBet`.
    ///
    /// Input is expected to be a single date's fixtures; input order only
    /// matters for breaking exact ties.
    pub fn select(&self, fixtures: &[Fixture]) -> BetSelection {
        match combo::search(fixtures, &self.config) {
            ComboSearch::Found {
                fixtures: legs,
                combined_odds,
                total,
                combinations,
                qualified,
            } => {
                info!(
                    fixtures_in = fixtures.len(),
                    combinations,
                    qualified,
                    combined_odds = %format!("{:.6}", combined_odds.round_dp(6)),
                    total = %total,
                    "Combo bet selected"
                );
                return BetSelection::Combo {
                    fixtures: legs,
                    combined_odds,
                };
            }
            other => debug!(outcome = ?other, "No combo, trying single fallback"),
        }

        match single::find_single(fixtures, &self.config) {
            Some(fixture) => {
                info!(
                    fixtures_in = fixtures.len(),
                    team = %fixture.trend_team,
                    odds = %fixture.probability,
                    "Single bet selected"
                );
                BetSelection::Single {
                    fixture: fixture.clone(),
                }
            }
            None => {
                info!(fixtures_in = fixtures.len(), "No bet of the day");
                BetSelection::NoBet
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
