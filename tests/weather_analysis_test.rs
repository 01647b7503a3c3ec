// ABOUTME: Integration tests for weather analysis and snapshot derivation
// ABOUTME: Covers thermal states, hunting conditions, optimal windows and payload validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;

use bionic_core::errors::ProviderError;
use bionic_core::models::{ConditionsRating, FrontType, HourlyForecast, ThermalState};
use bionic_intelligence::build_weather_snapshot;
use bionic_intelligence::weather_analysis::{
    analyze_hunting_conditions, calculate_thermal_state, find_next_optimal_window, HuntingInputs,
};

fn inputs(wind_speed: f64, temperature: f64, precipitation: f64) -> HuntingInputs {
    HuntingInputs {
        wind_speed,
        temperature,
        precipitation,
        thermal_state: ThermalState::Stable,
        front_type: FrontType::None,
        pressure: None,
    }
}

fn hours_with_scores(scores: &[f64]) -> Vec<HourlyForecast> {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| HourlyForecast {
            time: common::local_time(0) + Duration::hours(i as i64),
            temperature: 8.0,
            humidity: 80.0,
            precipitation_probability: 0.0,
            precipitation: 0.0,
            cloud_cover: 50.0,
            wind_speed: 10.0,
            wind_direction: 250.0,
            hunting_score: *score,
        })
        .collect()
}

#[test]
fn test_thermal_state_from_temperature_trend() {
    assert_eq!(
        calculate_thermal_state(&[10.0, 9.0, 8.0], 1),
        ThermalState::Descending
    );
    assert_eq!(
        calculate_thermal_state(&[8.0, 9.0, 10.0], 1),
        ThermalState::Ascending
    );
    assert_eq!(
        calculate_thermal_state(&[9.0, 9.0, 9.0], 1),
        ThermalState::Stable
    );
}

#[test]
fn test_ideal_conditions_score_high() {
    let conditions = analyze_hunting_conditions(&inputs(10.0, 5.0, 0.0));
    assert!(conditions.score >= 75.0, "score {}", conditions.score);
    assert_eq!(conditions.rating, ConditionsRating::Excellent);
    assert!(!conditions.factors.is_empty());
}

#[test]
fn test_strong_wind_costs_at_least_twenty_points() {
    let calm = analyze_hunting_conditions(&inputs(10.0, 5.0, 0.0));
    let windy = analyze_hunting_conditions(&inputs(30.0, 5.0, 0.0));
    assert!(calm.score - windy.score >= 20.0);
}

#[test]
fn test_single_block_defines_the_window() {
    let hourly = hours_with_scores(&[40.0, 65.0, 70.0, 62.0, 30.0, 45.0]);
    let window = find_next_optimal_window(&hourly).unwrap();
    assert_eq!(window.start, hourly[1].time);
    assert_eq!(window.end, hourly[3].time);
    assert_eq!(window.hours, 3);
    assert!((window.average_score - 65.7).abs() < 1e-9);
}

#[test]
fn test_best_average_block_wins_and_ties_go_earliest() {
    let hourly = hours_with_scores(&[70.0, 70.0, 20.0, 90.0, 10.0, 70.0, 70.0]);
    let window = find_next_optimal_window(&hourly).unwrap();
    assert_eq!(window.start, hourly[3].time);
    assert_eq!(window.hours, 1);

    let tied = hours_with_scores(&[65.0, 30.0, 65.0]);
    let window = find_next_optimal_window(&tied).unwrap();
    assert_eq!(window.start, tied[0].time);
}

#[test]
fn test_no_window_below_threshold() {
    let hourly = hours_with_scores(&[59.9, 40.0, 10.0]);
    assert!(find_next_optimal_window(&hourly).is_none());
}

#[test]
fn test_snapshot_from_stable_forecast() {
    let raw = common::raw_forecast(48, 8.0, 10.0);
    let snapshot = build_weather_snapshot(&raw).unwrap();

    assert_eq!(snapshot.hourly_forecast.len(), 48);
    assert_eq!(snapshot.current_time, common::local_time(6));
    assert_eq!(snapshot.thermal_state, ThermalState::Stable);
    assert_eq!(snapshot.front_type, FrontType::None);
    assert!((snapshot.hunting_conditions.score - 85.0).abs() < 1e-9);
    assert!(snapshot.thermal_risk_level.abs() < 1e-9);

    let window = snapshot.next_optimal_window.unwrap();
    assert_eq!(window.start, common::local_time(6));
    assert_eq!(window.hours, 42);
}

#[test]
fn test_short_forecast_is_rejected() {
    let raw = common::raw_forecast(12, 8.0, 10.0);
    let error = build_weather_snapshot(&raw).unwrap_err();
    assert!(matches!(error, ProviderError::InvalidData { .. }));
}

#[test]
fn test_missing_current_temperature_is_rejected() {
    let mut raw = common::raw_forecast(48, 8.0, 10.0);
    raw.current.temperature_2m = None;
    assert!(build_weather_snapshot(&raw).is_err());
}
