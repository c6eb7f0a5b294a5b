//! JSON fixture loader.
//!
//! Reads the trend file produced by the upstream scraper and turns each
//! record into a `Fixture`. Two layouts are accepted:
//!
//! - a flat list of fixture objects
//! - a one-element list wrapping `{ "winning_trends": [ ... ] }`
//!
//! A bare `{ "winning_trends": [ ... ] }` object is accepted as well.
//! Source keys are renamed on the way in: `team_1` → home, `team_2` → away,
//! `game_date` → date, `game_time` → time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::FixtureSource;
use crate::types::{Fixture, Odds, TrendError};

/// Key of the wrapper object some exports nest the fixture list under.
const WRAPPER_KEY: &str = "winning_trends";

// ---------------------------------------------------------------------------
// Raw record
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawFixture {
    team_1: String,
    team_2: String,
    game_date: String,
    game_time: RawTime,
    probability: Odds,
    trend_description: String,
}

/// Kick-off times arrive as text ("18:00") and occasionally as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTime {
    Text(String),
    Number(serde_json::Number),
}

impl RawTime {
    fn into_text(self) -> String {
        match self {
            RawTime::Text(s) => s,
            RawTime::Number(n) => n.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn malformed(origin: &str, message: impl Into<String>) -> TrendError {
    TrendError::InputMalformed {
        path: origin.to_string(),
        message: message.into(),
    }
}

/// Parse a `game_date` value, keeping only the calendar date.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Pull the list of fixture records out of whichever layout the file uses.
fn unwrap_rows(value: Value) -> Result<Vec<Value>, String> {
    match value {
        Value::Array(mut items) => {
            let wrapped = items.len() == 1
                && items[0].as_object().is_some_and(|o| o.contains_key(WRAPPER_KEY));
            if !wrapped {
                return Ok(items);
            }
            match items.pop() {
                Some(Value::Object(mut map)) => rows_from_wrapper(map.remove(WRAPPER_KEY)),
                _ => Err(format!("expected an object holding `{WRAPPER_KEY}`")),
            }
        }
        Value::Object(mut map) if map.contains_key(WRAPPER_KEY) => {
            rows_from_wrapper(map.remove(WRAPPER_KEY))
        }
        other => Err(format!(
            "expected a list of fixtures, found {}",
            json_type_name(&other)
        )),
    }
}

fn rows_from_wrapper(inner: Option<Value>) -> Result<Vec<Value>, String> {
    match inner {
        Some(Value::Array(rows)) => Ok(rows),
        Some(other) => Err(format!(
            "`{WRAPPER_KEY}` must be a list, found {}",
            json_type_name(&other)
        )),
        None => Err(format!("missing `{WRAPPER_KEY}`")),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn parse_row(row: Value) -> Result<Fixture, String> {
    let raw: RawFixture = serde_json::from_value(row).map_err(|e| e.to_string())?;
    let date = parse_game_date(&raw.game_date)
        .ok_or_else(|| format!("unparseable game_date {:?}", raw.game_date))?;

    Ok(Fixture::new(
        date,
        raw.game_time.into_text(),
        raw.team_1,
        raw.team_2,
        raw.probability,
        raw.trend_description,
    ))
}

/// Parse the full text of a trend file.
///
/// `origin` names the source in error messages. The first bad row aborts
/// the whole load.
pub fn parse_fixtures(text: &str, origin: &str) -> Result<Vec<Fixture>, TrendError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| malformed(origin, format!("invalid JSON: {e}")))?;

    let rows = unwrap_rows(value).map_err(|m| malformed(origin, m))?;

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| parse_row(row).map_err(|m| malformed(origin, format!("row {i}: {m}"))))
        .collect()
}

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

/// Fixture table backed by a JSON file on disk, re-read on every load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FixtureSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Fixture>, TrendError> {
        let origin = self.path.display().to_string();

        if !self.path.exists() {
            warn!(path = %origin, "Data file not found");
            return Err(TrendError::InputMissing { path: origin });
        }

        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| malformed(&origin, format!("failed to read file: {e}")))?;

        let fixtures = parse_fixtures(&text, &origin).inspect_err(|e| {
            warn!(path = %origin, error = %e, "Data file rejected");
        })?;

        if fixtures.is_empty() {
            info!(path = %origin, "Data file holds no fixtures");
        } else {
            debug!(path = %origin, count = fixtures.len(), "Fixtures loaded");
        }
        Ok(fixtures)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
