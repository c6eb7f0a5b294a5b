//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`;
//! the selected date travels in the `?date=` query string, so handlers
//! hold no per-user state.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::PresentationConfig;
use crate::data::{available_dates, default_date, FixtureSource};
use crate::engine::{build_board, Board};
use crate::strategy::BetSelector;
use crate::types::{BetSelection, Fixture, Odds, TrendError};

/// Column headings of the fixture table, in display order.
pub const DISPLAY_COLUMNS: [&str; 7] = [
    "Date",
    "Time",
    "Home",
    "Away",
    "Trend Team",
    "Probability",
    "Trend_Description",
];

pub const NO_BET_MESSAGE: &str = "No valid Bet of the day found for the selected date.";
pub const SINGLE_BET_HEADLINE: &str = "Single Game Bet:";

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers. Immutable after startup.
pub struct DashboardState {
    pub source: Arc<dyn FixtureSource>,
    pub selector: BetSelector,
    pub presentation: PresentationConfig,
    /// URL prefix the assets directory is mounted under.
    pub assets_prefix: String,
}

impl DashboardState {
    pub fn new(
        source: Arc<dyn FixtureSource>,
        selector: BetSelector,
        presentation: PresentationConfig,
    ) -> Self {
        Self {
            source,
            selector,
            presentation,
            assets_prefix: "/assets".to_string(),
        }
    }

    fn asset_url(&self, file: &str) -> String {
        format!("{}/{}", self.assets_prefix, file.trim_start_matches('/'))
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures surfaced to the page as an error banner.
#[derive(Debug)]
pub enum ApiError {
    Trend(TrendError),
    BadRequest(String),
    Internal(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl From<TrendError> for ApiError {
    fn from(e: TrendError) -> Self {
        ApiError::Trend(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Trend(e) => {
                let status = match e {
                    TrendError::InputMissing { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.kind().to_string(), e.to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request".to_string(), msg),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal".to_string(), msg)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// `None` when absent or blank; 400 when present but not `YYYY-MM-DD`.
    pub fn parse(&self) -> Result<Option<NaiveDate>, ApiError> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| ApiError::BadRequest(format!("invalid date {raw:?}, expected YYYY-MM-DD"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureRow {
    pub date: NaiveDate,
    pub time: String,
    pub home: String,
    pub away: String,
    pub trend_team: String,
    pub probability: Odds,
    pub trend_description: String,
}

impl From<&Fixture> for FixtureRow {
    fn from(fx: &Fixture) -> Self {
        Self {
            date: fx.date,
            time: fx.time.clone(),
            home: fx.home.clone(),
            away: fx.away.clone(),
            trend_team: fx.trend_team.clone(),
            probability: fx.probability,
            trend_description: fx.trend_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BetLeg {
    pub time: String,
    pub trend_team: String,
    pub probability: Odds,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BetView {
    /// "combo" | "single" | "none"
    pub kind: String,
    pub headline: Option<String>,
    /// Combined odds to 6 decimal places (combo only).
    pub combined_odds: Option<String>,
    pub legs: Vec<BetLeg>,
    /// Informational text when there is no bet.
    pub message: Option<String>,
    /// WhatsApp share link carrying the bet summary.
    pub share_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkView {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresentationView {
    pub page_title: String,
    pub heading: String,
    pub tagline: String,
    pub image_url: Option<String>,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    pub selected_date: NaiveDate,
    pub available_dates: Vec<NaiveDate>,
    pub columns: Vec<String>,
    pub fixtures: Vec<FixtureRow>,
    pub bet: BetView,
    pub presentation: PresentationView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesResponse {
    pub date: NaiveDate,
    pub columns: Vec<String>,
    pub fixtures: Vec<FixtureRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatesResponse {
    pub default_date: NaiveDate,
    pub dates: Vec<NaiveDate>,
}

// ---------------------------------------------------------------------------
// View builders
// ---------------------------------------------------------------------------

/// Format combined odds the way the sidebar shows them.
pub fn format_combined_odds(odds: rust_decimal::Decimal) -> String {
    format!("{:.6}", odds.round_dp(6))
}

/// One-line bet summary used for share links.
pub fn bet_summary(date: NaiveDate, bet: &BetSelection) -> Option<String> {
    let legs: Vec<String> = bet
        .legs()
        .iter()
        .map(|fx| {
            let team = if fx.trend_team.is_empty() {
                format!("{} v {}", fx.home, fx.away)
            } else {
                fx.trend_team.clone()
            };
            format!("{} {} @ {}", fx.time, team, fx.probability)
        })
        .collect();

    match bet {
        BetSelection::Combo { combined_odds, .. } => Some(format!(
            "Bet of the day {date}: {} (combined odds {})",
            legs.join(" | "),
            format_combined_odds(*combined_odds)
        )),
        BetSelection::Single { .. } => Some(format!("Bet of the day {date}: {}", legs.join(""))),
        BetSelection::NoBet => None,
    }
}

pub fn bet_view(date: NaiveDate, bet: &BetSelection) -> BetView {
    let legs = bet
        .legs()
        .iter()
        .map(|fx| BetLeg {
            time: fx.time.clone(),
            trend_team: fx.trend_team.clone(),
            probability: fx.probability,
        })
        .collect();

    let share_url = bet_summary(date, bet)
        .map(|text| format!("https://wa.me/?text={}", urlencoding::encode(&text)));

    let (headline, combined_odds, message) = match bet {
        BetSelection::Combo { combined_odds, .. } => {
            let odds = format_combined_odds(*combined_odds);
            (Some(format!("Combined Odds: {odds}")), Some(odds), None)
        }
        BetSelection::Single { .. } => (Some(SINGLE_BET_HEADLINE.to_string()), None, None),
        BetSelection::NoBet => (None, None, Some(NO_BET_MESSAGE.to_string())),
    };

    BetView {
        kind: bet.kind().to_string(),
        headline,
        combined_odds,
        legs,
        message,
        share_url,
    }
}

fn presentation_view(state: &DashboardState) -> PresentationView {
    let p = &state.presentation;
    PresentationView {
        page_title: p.page_title.clone(),
        heading: p.heading.clone(),
        tagline: p.tagline.clone(),
        image_url: p.image.as_deref().map(|img| state.asset_url(img)),
        links: p
            .links
            .iter()
            .map(|l| LinkView {
                name: l.name.clone(),
                url: l.url.clone(),
                icon_url: state.asset_url(&l.icon),
            })
            .collect(),
    }
}

fn columns() -> Vec<String> {
    DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Blocking work
// ---------------------------------------------------------------------------

/// Run the board pass off the async runtime (it reads the data file).
async fn load_board(state: AppState, date: Option<NaiveDate>) -> Result<Board, ApiError> {
    let today = chrono::Local::now().date_naive();
    tokio::task::spawn_blocking(move || {
        build_board(state.source.as_ref(), &state.selector, date, today)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Board task failed");
        ApiError::Internal("board computation failed".to_string())
    })?
    .map_err(|e| {
        warn!(error = %e, "Board load failed");
        ApiError::from(e)
    })
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/board?date=YYYY-MM-DD
pub async fn get_board(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BoardResponse>, ApiError> {
    let date = query.parse()?;
    let board = load_board(state.clone(), date).await?;

    Ok(Json(BoardResponse {
        selected_date: board.selected_date,
        available_dates: board.available_dates.clone(),
        columns: columns(),
        fixtures: board.fixtures.iter().map(FixtureRow::from).collect(),
        bet: bet_view(board.selected_date, &board.bet),
        presentation: presentation_view(&state),
    }))
}

/// GET /api/fixtures?date=YYYY-MM-DD
pub async fn get_fixtures(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<FixturesResponse>, ApiError> {
    let date = query.parse()?;
    let board = load_board(state, date).await?;

    Ok(Json(FixturesResponse {
        date: board.selected_date,
        columns: columns(),
        fixtures: board.fixtures.iter().map(FixtureRow::from).collect(),
    }))
}

/// GET /api/bet?date=YYYY-MM-DD
pub async fn get_bet(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BetView>, ApiError> {
    let date = query.parse()?;
    let board = load_board(state, date).await?;
    Ok(Json(bet_view(board.selected_date, &board.bet)))
}

/// GET /api/dates
pub async fn get_dates(State(state): State<AppState>) -> Result<Json<DatesResponse>, ApiError> {
    let today = chrono::Local::now().date_naive();
    let table = tokio::task::spawn_blocking(move || state.source.load())
        .await
        .map_err(|e| ApiError::Internal(format!("load task failed: {e}")))??;

    Ok(Json(DatesResponse {
        default_date: default_date(&table, today),
        dates: available_dates(&table),
    }))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
