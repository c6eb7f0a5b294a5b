//! Bet-of-the-day scenarios run through the public selector API.
//!
//! Covers the odds-band and product-window boundaries, the documented
//! scenarios, and the deterministic tie-break.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use trendboard::strategy::combo::{self, ComboSearch};
use trendboard::strategy::{BetSelector, SelectorConfig};
use trendboard::types::{extract_trend_team, BetSelection, Fixture, Odds};

// ---- helpers ---------------------------------------------------------------

fn make_fixture(home: &str, time: &str, odds: Decimal) -> Fixture {
    Fixture::new(
        NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
        time,
        home,
        format!("{home} Opponents"),
        Odds::new(odds).unwrap(),
        format!("{home} have won 6 in a row"),
    )
}

fn select(fixtures: &[Fixture]) -> BetSelection {
    BetSelector::default().select(fixtures)
}

fn homes(bet: &BetSelection) -> Vec<String> {
    bet.legs().iter().map(|fx| fx.home.clone()).collect()
}

fn combined(bet: &BetSelection) -> Decimal {
    match bet {
        BetSelection::Combo { combined_odds, .. } => *combined_odds,
        other => panic!("expected combo, got {other:?}"),
    }
}

// ---- scenarios -------------------------------------------------------------

#[test]
fn trio_over_product_window_falls_back_to_single() {
    // 1.25 x 1.30 x 1.35 = 2.19375
    let fixtures = vec![
        make_fixture("A", "18:00", dec!(1.25)),
        make_fixture("B", "15:00", dec!(1.30)),
        make_fixture("C", "20:00", dec!(1.35)),
    ];
    let bet = select(&fixtures);
    assert_eq!(bet.kind(), "single");
    assert_eq!(homes(&bet), vec!["A"]);
}

#[test]
fn trio_inside_window_is_combo_ordered_by_time() {
    let fixtures = vec![
        make_fixture("A", "18:00", dec!(1.25)),
        make_fixture("B", "15:00", dec!(1.30)),
        make_fixture("D", "20:00", dec!(1.28)),
    ];
    let bet = select(&fixtures);
    assert_eq!(combined(&bet), dec!(2.08));
    assert_eq!(homes(&bet), vec!["B", "A", "D"]);
    assert!(format!("{bet}").contains("2.080000"));
}

#[test]
fn no_combo_band_entries_gives_single() {
    let fixtures = vec![
        make_fixture("E", "15:00", dec!(1.45)),
        make_fixture("F", "17:00", dec!(1.7)),
        make_fixture("G", "19:00", dec!(1.1)),
    ];
    let bet = select(&fixtures);
    assert_eq!(bet, BetSelection::Single { fixture: fixtures[0].clone() });
}

#[test]
fn empty_day_is_no_bet() {
    assert_eq!(select(&[]), BetSelection::NoBet);
    assert!(!select(&[]).is_bet());
}

#[test]
fn fewer_than_three_in_band_never_combos() {
    let fixtures = vec![
        make_fixture("A", "12:00", dec!(1.25)),
        make_fixture("B", "13:00", dec!(1.30)),
        make_fixture("C", "14:00", dec!(1.5)),
    ];
    assert!(matches!(
        combo::search(&fixtures, &SelectorConfig::default()),
        ComboSearch::TooFewFixtures { in_band: 2 }
    ));
    assert_eq!(select(&fixtures).kind(), "single");
}

// ---- boundaries ------------------------------------------------------------

#[test]
fn product_exactly_lower_bound_is_excluded() {
    // 1.2 x 1.2 x 1.25 = 1.8
    let fixtures = vec![
        make_fixture("A", "12:00", dec!(1.2)),
        make_fixture("B", "13:00", dec!(1.2)),
        make_fixture("C", "14:00", dec!(1.25)),
    ];
    let bet = select(&fixtures);
    assert_eq!(bet.kind(), "single");
    assert_eq!(homes(&bet), vec!["A"]);
}

#[test]
fn product_exactly_upper_bound_is_included() {
    // 1.25 x 1.25 x 1.344 = 2.1
    let fixtures = vec![
        make_fixture("A", "12:00", dec!(1.25)),
        make_fixture("B", "13:00", dec!(1.25)),
        make_fixture("C", "14:00", dec!(1.344)),
    ];
    let bet = select(&fixtures);
    assert_eq!(combined(&bet), dec!(2.1));
}

#[test]
fn band_edges_for_combo_legs() {
    // 1.39 x 1.2 x 1.2 = 2.0016
    let fixtures = vec![
        make_fixture("A", "12:00", dec!(1.39)),
        make_fixture("B", "13:00", dec!(1.2)),
        make_fixture("C", "14:00", dec!(1.2)),
    ];
    assert_eq!(combined(&select(&fixtures)), dec!(2.0016));

    let just_outside = vec![
        make_fixture("A", "12:00", dec!(1.391)),
        make_fixture("B", "13:00", dec!(1.2)),
        make_fixture("C", "14:00", dec!(1.2)),
    ];
    assert_eq!(select(&just_outside).kind(), "single");
}

#[test]
fn band_edges_for_single() {
    let at_floor = vec![make_fixture("A", "12:00", dec!(1.2))];
    assert_eq!(select(&at_floor).kind(), "single");

    let at_ceiling = vec![make_fixture("A", "12:00", dec!(1.6))];
    assert_eq!(select(&at_ceiling).kind(), "single");

    let above = vec![make_fixture("A", "12:00", dec!(1.61))];
    assert_eq!(select(&above), BetSelection::NoBet);

    let below = vec![make_fixture("A", "12:00", dec!(1.19))];
    assert_eq!(select(&below), BetSelection::NoBet);
}

// ---- ordering and ties -----------------------------------------------------

#[test]
fn lowest_total_wins_among_candidates() {
    // A·B·D: total 3.83; A·D·E: 1.25+1.28+1.22 = 3.75, product 1.952
    let fixtures = vec![
        make_fixture("A", "18:00", dec!(1.25)),
        make_fixture("B", "15:00", dec!(1.30)),
        make_fixture("D", "20:00", dec!(1.28)),
        make_fixture("E", "09:30", dec!(1.22)),
    ];
    let bet = select(&fixtures);
    assert_eq!(homes(&bet), vec!["E", "A", "D"]);
    assert_eq!(combined(&bet), dec!(1.952));
}

#[test]
fn exact_total_tie_keeps_first_in_input_order() {
    // Every triple has total 3.75 and product 1.953125.
    let fixtures = vec![
        make_fixture("P", "18:00", dec!(1.25)),
        make_fixture("Q", "17:00", dec!(1.25)),
        make_fixture("R", "16:00", dec!(1.25)),
        make_fixture("S", "15:00", dec!(1.25)),
    ];
    let bet = select(&fixtures);
    assert_eq!(homes(&bet), vec!["R", "Q", "P"]);
    assert_eq!(combined(&bet), dec!(1.953125));
}

#[test]
fn single_tie_keeps_first_in_input_order() {
    let fixtures = vec![
        make_fixture("X", "20:00", dec!(1.5)),
        make_fixture("Y", "12:00", dec!(1.45)),
        make_fixture("Z", "13:00", dec!(1.45)),
    ];
    assert_eq!(homes(&select(&fixtures)), vec!["Y"]);
}

#[test]
fn selection_is_independent_of_call_count() {
    let fixtures = vec![
        make_fixture("A", "18:00", dec!(1.25)),
        make_fixture("B", "15:00", dec!(1.30)),
        make_fixture("D", "20:00", dec!(1.28)),
        make_fixture("E", "16:00", dec!(1.45)),
    ];
    let selector = BetSelector::default();
    let first = selector.select(&fixtures);
    for _ in 0..5 {
        assert_eq!(selector.select(&fixtures), first);
    }
}

#[test]
fn combination_budget_degrades_to_single() {
    let selector = BetSelector::new(SelectorConfig {
        max_combinations: Some(3),
        ..SelectorConfig::default()
    });
    let fixtures = vec![
        make_fixture("A", "18:00", dec!(1.25)),
        make_fixture("B", "15:00", dec!(1.30)),
        make_fixture("D", "20:00", dec!(1.28)),
        make_fixture("E", "16:00", dec!(1.22)),
    ];
    let bet = selector.select(&fixtures);
    assert_eq!(bet.kind(), "single");
    assert_eq!(homes(&bet), vec!["E"]);

    let roomy = BetSelector::new(SelectorConfig {
        max_combinations: Some(4),
        ..SelectorConfig::default()
    });
    assert_eq!(roomy.select(&fixtures).kind(), "combo");
}

// ---- trend team ------------------------------------------------------------

#[test]
fn trend_team_extraction() {
    assert_eq!(extract_trend_team("Lyon", "Nice", "Nice unbeaten away"), "Nice");
    assert_eq!(extract_trend_team("Lyon", "Nice", "Lyon beat Nice twice"), "Lyon");
    assert_eq!(extract_trend_team("Lyon", "Nice", "Over 2.5 goals"), "");
}
