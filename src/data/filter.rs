//! Date filtering over a loaded fixture table.

use chrono::NaiveDate;

use crate::types::Fixture;

/// Fixtures played on `date`, in their original order.
pub fn filter_by_date(fixtures: &[Fixture], date: NaiveDate) -> Vec<Fixture> {
    fixtures.iter().filter(|fx| fx.date == date).cloned().collect()
}

/// Distinct fixture dates, ascending.
pub fn available_dates(fixtures: &[Fixture]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = fixtures.iter().map(|fx| fx.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// The date shown when none is requested: the earliest fixture date,
/// or `today` for an empty table.
pub fn default_date(fixtures: &[Fixture], today: NaiveDate) -> NaiveDate {
    fixtures.iter().map(|fx| fx.date).min().unwrap_or(today)
}
