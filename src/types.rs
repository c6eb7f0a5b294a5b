//! Shared types for TRENDBOARD.
//!
//! These types form the data model used across all modules: the loader
//! produces `Fixture`s, the selector turns them into a `BetSelection`,
//! and the dashboard renders both.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Odds
// ---------------------------------------------------------------------------

/// Decimal odds for a trend (the payout multiplier if the trend holds).
///
/// The input files call this field `probability`, but the value is an
/// odds figure such as `1.28`, not a number in [0, 1]. Always > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "Decimal")]
pub struct Odds(Decimal);

/// Bounds on odds read from JSON numbers. Outside them `Decimal` would
/// round the value to zero or overflow.
const MIN_SUPPORTED_ODDS: f64 = 1e-20;
const MAX_SUPPORTED_ODDS: f64 = 7.9e28;

impl Odds {
    /// Wrap a decimal value, rejecting zero and negative odds.
    pub fn new(value: Decimal) -> Result<Self, TrendError> {
        if value <= Decimal::ZERO {
            return Err(TrendError::InvalidOdds(format!(
                "odds must be greater than zero, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Convert a JSON-style float, checking sign and range before any rounding.
    pub fn from_f64(value: f64) -> Result<Self, TrendError> {
        if !value.is_finite() {
            return Err(TrendError::InvalidOdds(format!(
                "odds must be a finite number, got {value}"
            )));
        }
        if value <= 0.0 {
            return Err(TrendError::InvalidOdds(format!(
                "odds must be greater than zero, got {value}"
            )));
        }
        if !(MIN_SUPPORTED_ODDS..=MAX_SUPPORTED_ODDS).contains(&value) {
            return Err(TrendError::InvalidOdds(format!(
                "odds {value:e} outside the supported range [{MIN_SUPPORTED_ODDS:e}, {MAX_SUPPORTED_ODDS:e}]"
            )));
        }
        // Shortest round-trip text keeps 1.28 exact; from_f64 covers the rest.
        let decimal = Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| Decimal::from_f64(value))
            .ok_or_else(|| TrendError::InvalidOdds(format!("odds {value:e} is not representable")))?;
        Odds::new(decimal)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl<'de> Deserialize<'de> for Odds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Odds::from_f64(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Decimal> for Odds {
    type Error = TrendError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Odds::new(value)
    }
}

impl From<Odds> for Decimal {
    fn from(odds: Odds) -> Self {
        odds.0
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// One scheduled match with its trend metadata and odds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fixture {
    pub date: NaiveDate,
    /// Kick-off time as given in the source file ("18:00", "20:45:00", ...).
    pub time: String,
    pub home: String,
    pub away: String,
    /// Whichever of `home`/`away` the description names; empty if neither.
    pub trend_team: String,
    pub probability: Odds,
    pub trend_description: String,
}

impl Fixture {
    /// Build a fixture, deriving `trend_team` from the description.
    pub fn new(
        date: NaiveDate,
        time: impl Into<String>,
        home: impl Into<String>,
        away: impl Into<String>,
        probability: Odds,
        trend_description: impl Into<String>,
    ) -> Self {
        let home = home.into();
        let away = away.into();
        let trend_description = trend_description.into();
        let trend_team = extract_trend_team(&home, &away, &trend_description);
        Self {
            date,
            time: time.into(),
            home,
            away,
            trend_team,
            probability,
            trend_description,
        }
    }

    /// Parsed kick-off time, if the `time` text is a recognisable clock time.
    pub fn kickoff(&self) -> Option<NaiveTime> {
        let t = self.time.trim();
        NaiveTime::parse_from_str(t, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
            .ok()
    }

    /// Display ordering by time of day.
    ///
    /// Parsable clock times sort chronologically ("9:00" before "18:00");
    /// anything else sorts after them, lexically.
    pub fn cmp_by_time(&self, other: &Fixture) -> Ordering {
        match (self.kickoff(), other.kickoff()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.time.cmp(&other.time),
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} vs {} @ {}",
            self.date, self.time, self.home, self.away, self.probability
        )
    }
}

/// Pick the team named in a trend description.
///
/// Home is checked first, so a description naming both teams yields home.
pub fn extract_trend_team(home: &str, away: &str, description: &str) -> String {
    if description.contains(home) {
        home.to_string()
    } else if description.contains(away) {
        away.to_string()
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Selection result
// ---------------------------------------------------------------------------

/// Number of legs in a combination bet.
pub const COMBO_LEGS: usize = 3;

/// Outcome of the bet-of-the-day search for one date.
#[derive(Debug, Clone, PartialEq)]
pub enum BetSelection {
    /// Three fixtures ordered by kick-off time, with the product of their odds.
    Combo {
        fixtures: [Fixture; COMBO_LEGS],
        combined_odds: Decimal,
    },
    /// Fallback: the single lowest-odds fixture in the wider band.
    Single { fixture: Fixture },
    /// Nothing qualified. A valid outcome, not an error.
    NoBet,
}

impl BetSelection {
    /// Short machine-readable tag ("combo", "single", "none").
    pub fn kind(&self) -> &'static str {
        match self {
            BetSelection::Combo { .. } => "combo",
            BetSelection::Single { .. } => "single",
            BetSelection::NoBet => "none",
        }
    }

    /// The fixtures making up the bet, in display order.
    pub fn legs(&self) -> &[Fixture] {
        match self {
            BetSelection::Combo { fixtures, .. } => fixtures,
            BetSelection::Single { fixture } => std::slice::from_ref(fixture),
            BetSelection::NoBet => &[],
        }
    }

    pub fn is_bet(&self) -> bool {
        !matches!(self, BetSelection::NoBet)
    }
}

impl fmt::Display for BetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetSelection::Combo { fixtures, combined_odds } => {
                let legs: Vec<String> = fixtures
                    .iter()
                    .map(|fx| format!("{} {} @ {}", fx.time, fx.trend_team, fx.probability))
                    .collect();
                write!(f, "Combo ({:.6}): {}", combined_odds.round_dp(6), legs.join(" | "))
            }
            BetSelection::Single { fixture } => write!(
                f,
                "Single: {} {} @ {}",
                fixture.time, fixture.trend_team, fixture.probability
            ),
            BetSelection::NoBet => write!(f, "No bet"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for TRENDBOARD.
#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("Data file not found at path: {path}")]
    InputMissing { path: String },

    #[error("Error loading data file {path}: {message}")]
    InputMalformed { path: String, message: String },

    #[error("Invalid odds: {0}")]
    InvalidOdds(String),
}

impl TrendError {
    /// Stable identifier used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            TrendError::InputMissing { .. } => "input_missing",
            TrendError::InputMalformed { .. } | TrendError::InvalidOdds(_) => "input_malformed",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
