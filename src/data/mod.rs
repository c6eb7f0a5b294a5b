//! Fixture data: the table loader and the date filter.
//!
//! Defines the `FixtureSource` trait, the seam between the dashboard and
//! wherever the day's trend records come from.

pub mod filter;
pub mod loader;

use crate::types::{Fixture, TrendError};

/// Abstraction over fixture tables.
///
/// Each call returns a fresh, fully validated snapshot. A failed load
/// returns no rows at all, never a partial table.
#[cfg_attr(test, mockall::automock)]
pub trait FixtureSource: Send + Sync {
    /// Load every fixture the source holds.
    fn load(&self) -> Result<Vec<Fixture>, TrendError>;

    /// Human-readable origin (file path, fixture name) for logs.
    fn describe(&self) -> String;
}

pub use filter::{available_dates, default_date, filter_by_date};
pub use loader::{parse_fixtures, JsonFileSource};
