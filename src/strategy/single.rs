//! Single-fixture fallback.
//!
//! Used when no three-leg combination qualifies: take the shortest-priced
//! fixture inside the wider odds band.

use super::SelectorConfig;
use crate::types::Fixture;

/// Lowest-odds fixture in the closed single band.
///
/// Ties go to the fixture that appears first in the input.
pub fn find_single<'a>(fixtures: &'a [Fixture], config: &SelectorConfig) -> Option<&'a Fixture> {
    fixtures
        .iter()
        .filter(|fx| {
            let odds = fx.probability.value();
            odds >= config.single_min_odds && odds <= config.single_max_odds
        })
        .min_by_key(|fx| fx.probability)
}
