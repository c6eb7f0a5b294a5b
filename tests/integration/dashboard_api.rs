//! End-to-end dashboard requests against a trend file on disk.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use trendboard::config::PresentationConfig;
use trendboard::dashboard::build_router;
use trendboard::dashboard::routes::DashboardState;
use trendboard::data::JsonFileSource;
use trendboard::strategy::BetSelector;

const WRAPPED: &str = r#"[{"winning_trends": [
    {"team_1": "Arsenal", "team_2": "Fulham", "game_date": "2025-02-10",
     "game_time": "18:00", "probability": 1.25,
     "trend_description": "Arsenal have won 8 of their last 9"},
    {"team_1": "Brentford", "team_2": "Everton", "game_date": "2025-02-10",
     "game_time": "15:00", "probability": 1.30,
     "trend_description": "Everton have lost 5 away games in a row"},
    {"team_1": "Lille", "team_2": "Lens", "game_date": "2025-02-10",
     "game_time": "20:00", "probability": 1.28,
     "trend_description": "Over 1.5 goals in 9 of 10"},
    {"team_1": "Porto", "team_2": "Braga", "game_date": "2025-02-11",
     "game_time": "19:30", "probability": 1.45,
     "trend_description": "Porto have scored first in 7 of 8"}
]}]"#;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("trendboard_api_{}.json", uuid::Uuid::new_v4()))
}

fn write_temp(contents: &str) -> PathBuf {
    let path = temp_path();
    std::fs::write(&path, contents).unwrap();
    path
}

fn app_for(path: &PathBuf) -> Router {
    let state = Arc::new(DashboardState::new(
        Arc::new(JsonFileSource::new(path.clone())),
        BetSelector::default(),
        PresentationConfig::default(),
    ));
    build_router(state, "assets")
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn board_from_wrapped_file() {
    let path = write_temp(WRAPPED);
    let (status, json) = get_json(app_for(&path), "/api/board").await;
    std::fs::remove_file(&path).ok();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selected_date"], "2025-02-10");
    assert_eq!(json["available_dates"], serde_json::json!(["2025-02-10", "2025-02-11"]));

    let fixtures = json["fixtures"].as_array().unwrap();
    assert_eq!(fixtures.len(), 3);
    assert_eq!(fixtures[0]["home"], "Arsenal");
    assert_eq!(fixtures[1]["trend_team"], "Everton");
    assert_eq!(fixtures[2]["trend_team"], "");

    let bet = &json["bet"];
    assert_eq!(bet["kind"], "combo");
    assert_eq!(bet["combined_odds"], "2.080000");
    let leg_times: Vec<&str> = bet["legs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["time"].as_str().unwrap())
        .collect();
    assert_eq!(leg_times, vec!["15:00", "18:00", "20:00"]);
    assert!(bet["share_url"].as_str().unwrap().starts_with("https://wa.me/?text="));
}

#[tokio::test]
async fn selected_date_gives_single_bet() {
    let path = write_temp(WRAPPED);
    let (status, json) = get_json(app_for(&path), "/api/bet?date=2025-02-11").await;
    std::fs::remove_file(&path).ok();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kind"], "single");
    assert_eq!(json["headline"], "Single Game Bet:");
    assert_eq!(json["legs"][0]["trend_team"], "Porto");
    assert!(json["combined_odds"].is_null());
}

#[tokio::test]
async fn file_edits_show_up_on_next_request() {
    let path = write_temp(WRAPPED);
    let (_, before) = get_json(app_for(&path), "/api/dates").await;
    assert_eq!(before["dates"].as_array().unwrap().len(), 2);

    std::fs::write(
        &path,
        r#"[{"team_1": "Ajax", "team_2": "PSV", "game_date": "2025-03-01",
             "game_time": "14:30", "probability": 1.4,
             "trend_description": "PSV unbeaten in 12"}]"#,
    )
    .unwrap();
    let (_, after) = get_json(app_for(&path), "/api/dates").await;
    std::fs::remove_file(&path).ok();

    assert_eq!(after["dates"], serde_json::json!(["2025-03-01"]));
    assert_eq!(after["default_date"], "2025-03-01");
}

#[tokio::test]
async fn missing_file_is_reported() {
    let path = temp_path();
    let (status, json) = get_json(app_for(&path), "/api/board").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "input_missing");
    assert!(json["message"].as_str().unwrap().starts_with("Data file not found at path:"));
}

#[tokio::test]
async fn malformed_row_rejects_whole_file() {
    let path = write_temp(
        r#"[{"team_1": "Ajax", "team_2": "PSV", "game_date": "2025-03-01",
             "game_time": "14:30", "probability": 1.4, "trend_description": "ok"},
            {"team_1": "Ajax", "team_2": "PSV", "game_date": "2025-03-02",
             "game_time": "14:30", "probability": "evens", "trend_description": "bad"}]"#,
    );
    let (status, json) = get_json(app_for(&path), "/api/fixtures").await;
    std::fs::remove_file(&path).ok();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "input_malformed");
    assert!(json["message"].as_str().unwrap().contains("row 1"));
}

#[tokio::test]
async fn empty_file_list_renders_no_bet() {
    let path = write_temp("[]");
    let (status, json) = get_json(app_for(&path), "/api/board?date=2025-02-10").await;
    std::fs::remove_file(&path).ok();

    assert_eq!(status, StatusCode::OK);
    assert!(json["fixtures"].as_array().unwrap().is_empty());
    assert_eq!(json["bet"]["kind"], "none");
    assert_eq!(json["bet"]["message"], "No valid Bet of the day found for the selected date.");
}
