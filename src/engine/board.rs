//! Board builder.
//!
//! One call is one dashboard request: load the fixture table, settle on a
//! date, narrow to that date and pick the bet of the day. Nothing is kept
//! between calls; the selected date arrives as an argument.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::data::{available_dates, default_date, filter_by_date, FixtureSource};
use crate::strategy::BetSelector;
use crate::types::{BetSelection, Fixture, TrendError};

/// Everything the presentation layer needs for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub selected_date: NaiveDate,
    /// Every date present in the table, ascending.
    pub available_dates: Vec<NaiveDate>,
    /// The selected date's fixtures, in file order.
    pub fixtures: Vec<Fixture>,
    pub bet: BetSelection,
}

/// Build the board for `requested` (or the default date when `None`).
///
/// `today` is only consulted when no date is requested and the table is
/// empty.
pub fn build_board(
    source: &dyn FixtureSource,
    selector: &BetSelector,
    requested: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Board, TrendError> {
    let table = source.load()?;
    let selected_date = requested.unwrap_or_else(|| default_date(&table, today));
    let fixtures = filter_by_date(&table, selected_date);

    debug!(
        source = %source.describe(),
        table_rows = table.len(),
        date = %selected_date,
        day_rows = fixtures.len(),
        "Fixtures filtered"
    );

    let bet = selector.select(&fixtures);
    info!(date = %selected_date, bet = %bet, "Board built");

    Ok(Board {
        selected_date,
        available_dates: available_dates(&table),
        fixtures,
        bet,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
