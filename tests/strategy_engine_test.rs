// ABOUTME: Integration tests for the tactical strategy engine
// ABOUTME: Covers full strategies, forecast-driven projections, movement, risks and products
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{DateTime, FixedOffset};

use bionic_core::models::{
    ActivityLevel, FrontType, HybridResult, ProductCategory, RiskKind, RiskLevel, SubScores,
    TerritoryContext, Trend, WaypointFeatures, WindImpact,
};
use bionic_hunt::hybrid::HybridModel;
use bionic_intelligence::strategy::projection::forecast_adjustment;
use bionic_intelligence::strategy::{
    evaluate_risks, predict_game_movement, project_stand_score, recommend_products,
};
use bionic_intelligence::{build_weather_snapshot, get_strategy_for_waypoint};

async fn hybrid_for(features: &WaypointFeatures) -> HybridResult {
    HybridModel::new(common::memory_store(), None)
        .calculate_hybrid_score(features, None, false, common::local_time(6))
        .await
        .unwrap()
}

fn scores(salines: f64, affuts: f64) -> SubScores {
    SubScores {
        habitat: 60.0,
        rut: 60.0,
        salines,
        affuts,
        trajets: 60.0,
        peuplements: 60.0,
        composite: 60.0,
    }
}

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

#[tokio::test]
async fn test_dawn_strategy_with_weather() {
    common::init_test_logging();
    let features = common::rich_features();
    let hybrid = hybrid_for(&features).await;
    let weather = build_weather_snapshot(&common::raw_forecast(48, 8.0, 10.0)).unwrap();

    let strategy = get_strategy_for_waypoint(
        &features,
        &hybrid,
        Some(&weather),
        &TerritoryContext::default(),
        common::local_time(6),
    );

    assert!(strategy.weather_available);
    assert!((strategy.approach_path.recommended_direction - 70.0).abs() < 1e-9);
    assert!((strategy.approach_path.stealth_score - 95.0).abs() < 1e-9);
    assert_eq!(strategy.approach_path.scent_risk, RiskLevel::Medium);
    assert_eq!(strategy.approach_path.visual_risk, RiskLevel::Low);
    assert_eq!(strategy.approach_path.distance_meters, 200);

    assert_eq!(strategy.game_movement.primary_corridor, 0);
    assert_eq!(strategy.game_movement.secondary_corridor, 90);
    assert_eq!(strategy.game_movement.arrival_window, "05:30–08:00");
    assert_eq!(strategy.game_movement.wind_impact, WindImpact::Boost);
    assert_eq!(strategy.game_movement.activity_level, ActivityLevel::High);

    assert!(strategy.risks.risks.is_empty());
    assert_eq!(strategy.risks.overall_level, RiskLevel::Low);
    assert_eq!(strategy.risks.recommended_exit_time, "10:00");
    assert!(strategy.live_flags.peak_window_active);

    let expected_current = ((hybrid.score_final * 1.15).min(100.0) * 10.0).round() / 10.0;
    assert!((strategy.stand_projection.current - expected_current).abs() < 1e-9);
    assert!(strategy.summary.contains(" • "));
    assert!(strategy.summary.contains("No notable risk"));
}

#[tokio::test]
async fn test_strategy_without_weather_skips_weather_branches() {
    let mut features = common::minimal_features();
    features.human_pressure = Some(75.0);
    let hybrid = hybrid_for(&features).await;

    let strategy = get_strategy_for_waypoint(
        &features,
        &hybrid,
        None,
        &TerritoryContext::default(),
        common::local_time(13),
    );

    assert!(!strategy.weather_available);
    assert!((strategy.approach_path.recommended_direction - 90.0).abs() < 1e-9);
    assert!((strategy.approach_path.stealth_score - 80.0).abs() < 1e-9);
    assert_eq!(strategy.game_movement.wind_impact, WindImpact::Neutral);
    assert_eq!(strategy.game_movement.primary_corridor, 180);
    assert_eq!(strategy.game_movement.activity_level, ActivityLevel::Low);

    assert_eq!(strategy.risks.risks.len(), 1);
    assert_eq!(strategy.risks.risks[0].kind, RiskKind::HumanPressure);
    assert_eq!(strategy.risks.overall_level, RiskLevel::High);
    assert_eq!(strategy.risks.recommended_exit_time, "16:00");
    assert!(strategy.live_flags.is_risky_now);
    assert!(!strategy.live_flags.is_optimal_now);
    assert!(strategy.summary.starts_with("Risky now"));
}

#[test]
fn test_calm_weather_adds_noise_risk() {
    let features = common::minimal_features();
    let weather = build_weather_snapshot(&common::raw_forecast(48, 8.0, 2.0)).unwrap();
    let strategy_risks = evaluate_risks(
        &features,
        Some(&weather),
        &TerritoryContext::default(),
        common::local_time(18),
    );
    assert!(strategy_risks
        .risks
        .iter()
        .any(|r| r.kind == RiskKind::WindNoise && r.level == RiskLevel::High));
    assert_eq!(strategy_risks.recommended_exit_time, "21:30");
}

#[test]
fn test_rut_attractant_in_autumn() {
    let products = recommend_products(&scores(40.0, 65.0), None, at("2025-10-18T07:00:00+02:00"));
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category, ProductCategory::Attractant);
    assert_eq!(products[0].placement_offset_meters, 30);
    assert_eq!(products[0].placement_direction, 0);
}

#[test]
fn test_mineral_block_in_summer() {
    let products = recommend_products(&scores(55.0, 90.0), None, at("2025-07-10T07:00:00+02:00"));
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category, ProductCategory::Mineral);
    assert_eq!(products[0].placement_direction, 270);
}

#[test]
fn test_no_products_when_scores_too_low() {
    assert!(recommend_products(&scores(10.0, 10.0), None, at("2025-10-18T07:00:00+02:00")).is_empty());
    assert!(recommend_products(&scores(90.0, 90.0), None, at("2025-02-18T07:00:00+01:00")).is_empty());
}

#[test]
fn test_forecast_adjustment_follows_hourly_changes() {
    let weather = build_weather_snapshot(&common::unsettled_forecast()).unwrap();
    let now = common::local_time(6);

    assert!((forecast_adjustment(Some(&weather), now, 1) + 5.0).abs() < 1e-9);
    assert!((forecast_adjustment(Some(&weather), now, 2) + 8.0).abs() < 1e-9);
    assert!((forecast_adjustment(Some(&weather), now, 3) + 3.0).abs() < 1e-9);
    assert!((forecast_adjustment(Some(&weather), now, 4) - 2.0).abs() < 1e-9);
    assert!(forecast_adjustment(Some(&weather), now, 5).abs() < 1e-9);
    assert!(forecast_adjustment(None, now, 2).abs() < 1e-9);
}

#[test]
fn test_heavy_rain_ahead_turns_projection_degrading() {
    let now = common::local_time(9);
    assert_eq!(project_stand_score(60.0, None, now).trend, Trend::Stable);

    let weather = build_weather_snapshot(&common::forecast_with_rain(12, 3.0)).unwrap();
    let projection = project_stand_score(60.0, Some(&weather), now);
    assert!((projection.current - 60.0).abs() < 1e-9);
    assert!((projection.in_1h - 60.0).abs() < 1e-9);
    assert!((projection.in_3h - 49.4).abs() < 1e-9);
    assert_eq!(projection.trend, Trend::Degrading);
}

#[test]
fn test_light_shower_ahead_turns_projection_improving() {
    let now = common::local_time(15);
    assert_eq!(project_stand_score(40.0, None, now).trend, Trend::Stable);

    let weather = build_weather_snapshot(&common::forecast_with_rain(18, 0.5)).unwrap();
    let projection = project_stand_score(40.0, Some(&weather), now);
    assert!((projection.in_3h - 47.0).abs() < 1e-9);
    assert_eq!(projection.trend, Trend::Improving);
}

#[tokio::test]
async fn test_degrading_strategy_flags_imminent_drop() {
    let features = common::minimal_features();
    let mut hybrid = hybrid_for(&features).await;
    hybrid.score_final = 60.0;
    let weather = build_weather_snapshot(&common::forecast_with_rain(12, 3.0)).unwrap();

    let strategy = get_strategy_for_waypoint(
        &features,
        &hybrid,
        Some(&weather),
        &TerritoryContext::default(),
        common::local_time(9),
    );

    assert_eq!(strategy.stand_projection.trend, Trend::Degrading);
    assert!(strategy.live_flags.will_degrade_soon);
    assert!(!strategy.live_flags.is_risky_now);
    assert!(strategy.summary.contains("Degrading to 49 in 3h"));
}

#[test]
fn test_cold_front_upgrades_activity() {
    let features = common::minimal_features();
    let now = common::local_time(10);
    let weather = build_weather_snapshot(&common::cold_front_forecast(0.0)).unwrap();
    assert_eq!(weather.front_type, FrontType::Cold);

    assert_eq!(
        predict_game_movement(&features, None, now).activity_level,
        ActivityLevel::Moderate
    );
    let movement = predict_game_movement(&features, Some(&weather), now);
    assert_eq!(movement.activity_level, ActivityLevel::High);
    assert_eq!(movement.wind_impact, WindImpact::Boost);
}

#[test]
fn test_heavy_rain_downgrades_activity() {
    let features = common::minimal_features();

    let front_in_rain = build_weather_snapshot(&common::cold_front_forecast(6.0)).unwrap();
    let movement = predict_game_movement(&features, Some(&front_in_rain), common::local_time(10));
    assert_eq!(movement.activity_level, ActivityLevel::Moderate);

    let mut raw = common::raw_forecast(48, 8.0, 10.0);
    raw.current.precipitation = Some(6.0);
    let downpour = build_weather_snapshot(&raw).unwrap();
    assert_eq!(downpour.front_type, FrontType::None);
    let movement = predict_game_movement(&features, Some(&downpour), common::local_time(12));
    assert_eq!(movement.activity_level, ActivityLevel::VeryLow);
}

#[tokio::test]
async fn test_high_thermal_inversion_makes_stand_risky() {
    let features = common::minimal_features();
    let hybrid = hybrid_for(&features).await;
    let weather = build_weather_snapshot(&common::inversion_forecast(Some(55.0))).unwrap();
    assert!((weather.thermal_risk_level - 75.0).abs() < 1e-9);

    let strategy = get_strategy_for_waypoint(
        &features,
        &hybrid,
        Some(&weather),
        &TerritoryContext::default(),
        common::local_time(13),
    );

    assert_eq!(strategy.risks.risks.len(), 1);
    assert_eq!(strategy.risks.risks[0].kind, RiskKind::ThermalInversion);
    assert_eq!(strategy.risks.risks[0].level, RiskLevel::High);
    assert_eq!(strategy.risks.overall_level, RiskLevel::High);
    assert!(strategy.live_flags.is_risky_now);
    assert!(!strategy.live_flags.is_optimal_now);
    assert!(strategy.summary.starts_with("Risky now"));
    assert!(strategy.summary.contains("Thermal inversion risk 75/100"));
}

#[test]
fn test_moderate_thermal_inversion_is_not_risky() {
    let features = common::minimal_features();
    let weather = build_weather_snapshot(&common::inversion_forecast(None)).unwrap();
    assert!((weather.thermal_risk_level - 55.0).abs() < 1e-9);

    let assessment = evaluate_risks(
        &features,
        Some(&weather),
        &TerritoryContext::default(),
        common::local_time(13),
    );
    assert_eq!(assessment.risks.len(), 1);
    assert_eq!(assessment.risks[0].kind, RiskKind::ThermalInversion);
    assert_eq!(assessment.overall_level, RiskLevel::Medium);
}
