// ABOUTME: Tactical strategy for a waypoint composed from independent pure computations
// ABOUTME: Projection, approach, movement, risks, products, live flags and a one-line summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Strategy Engine
//!
//! Turns a hybrid score and optional weather into hunting tactics. Every
//! sub-computation is a public function of its explicit inputs, including
//! the evaluation instant, so results are reproducible.
//!
//! When no weather snapshot is available the weather-dependent branches are
//! skipped and wind-relative placements use a westerly default.

/// Approach path analysis
pub mod approach;
/// Game movement prediction
pub mod movement;
/// Seasonal product recommendations
pub mod products;
/// Time-of-day score projection
pub mod projection;
/// Risk evaluation
pub mod risks;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use bionic_core::models::{
    GameMovement, HybridResult, LiveFlags, RiskAssessment, RiskKind, RiskLevel, StandProjection,
    StrategyResult, TerritoryContext, Trend, WaypointFeatures, WeatherSnapshot,
};

pub use approach::analyze_approach_path;
pub use movement::predict_game_movement;
pub use products::recommend_products;
pub use projection::project_stand_score;
pub use risks::evaluate_risks;

/// Wind bearing assumed without weather, prevailing westerly
pub const DEFAULT_WIND_BEARING: f64 = 270.0;

/// Score at or above which the stand counts as optimal
const OPTIMAL_SCORE: f64 = 70.0;
/// Drop over three hours that signals imminent degradation
const DEGRADE_MARGIN: f64 = 10.0;

/// Bearing folded into [0, 360)
#[must_use]
pub fn normalize_bearing(bearing: f64) -> f64 {
    bearing.rem_euclid(360.0)
}

/// Current wind bearing or the westerly default
#[must_use]
pub fn wind_bearing(weather: Option<&WeatherSnapshot>) -> f64 {
    weather.map_or(DEFAULT_WIND_BEARING, |w| w.current.wind_direction)
}

/// Boolean flags driving live UI badges
#[must_use]
pub fn compute_live_flags(
    projection: &StandProjection,
    risks: &RiskAssessment,
    movement: &GameMovement,
) -> LiveFlags {
    let high_risk = risks.overall_level == RiskLevel::High;
    let high_inversion = risks
        .risks
        .iter()
        .any(|r| r.kind == RiskKind::ThermalInversion && r.level == RiskLevel::High);
    let active = movement.activity_level.is_high();

    LiveFlags {
        is_optimal_now: projection.current >= OPTIMAL_SCORE && !high_risk && active,
        will_degrade_soon: projection.trend == Trend::Degrading
            && projection.in_3h < projection.current - DEGRADE_MARGIN,
        is_risky_now: high_risk || high_inversion,
        peak_window_active: active,
    }
}

/// Status, trend, activity and top risk joined into one line
#[must_use]
pub fn build_summary(
    projection: &StandProjection,
    risks: &RiskAssessment,
    movement: &GameMovement,
    flags: &LiveFlags,
) -> String {
    let status = if flags.is_optimal_now {
        format!("Optimal now ({:.0}/100)", projection.current)
    } else if flags.is_risky_now {
        format!("Risky now ({:.0}/100)", projection.current)
    } else {
        format!("Score {:.0}/100", projection.current)
    };
    let trend = match projection.trend {
        Trend::Improving => format!("Improving to {:.0} in 3h", projection.in_3h),
        Trend::Degrading => format!("Degrading to {:.0} in 3h", projection.in_3h),
        Trend::Stable => "Stable over the next 3h".to_owned(),
    };
    let activity = format!("Game activity {}", movement.activity_level.label());
    let top_risk = risks
        .risks
        .first()
        .map_or_else(|| "No notable risk".to_owned(), |r| r.description.clone());

    [status, trend, activity, top_risk].join(" • ")
}

/// Full tactical strategy for a scored waypoint at `now`
#[must_use]
pub fn get_strategy_for_waypoint(
    waypoint: &WaypointFeatures,
    hybrid: &HybridResult,
    weather: Option<&WeatherSnapshot>,
    territory: &TerritoryContext,
    now: DateTime<FixedOffset>,
) -> StrategyResult {
    let stand_projection = project_stand_score(hybrid.score_final, weather, now);
    let approach_path = analyze_approach_path(weather, now);
    let game_movement = predict_game_movement(waypoint, weather, now);
    let risks = evaluate_risks(waypoint, weather, territory, now);
    let product_recommendations = recommend_products(&hybrid.scores, weather, now);
    let live_flags = compute_live_flags(&stand_projection, &risks, &game_movement);
    let summary = build_summary(&stand_projection, &risks, &game_movement, &live_flags);

    debug!(
        score = hybrid.score_final,
        projected = stand_projection.current,
        risk = risks.overall_level.as_str(),
        products = product_recommendations.len(),
        weather_available = weather.is_some(),
        "Strategy computed"
    );

    StrategyResult {
        stand_projection,
        approach_path,
        game_movement,
        risks,
        product_recommendations,
        live_flags,
        summary,
        weather_available: weather.is_some(),
    }
}
