// ABOUTME: Game movement prediction from terrain aspect, hour and weather
// ABOUTME: Produces corridor bearings, arrival window, wind impact and activity level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, FixedOffset, Timelike};

use bionic_core::models::{
    ActivityLevel, FrontType, GameMovement, WaypointFeatures, WeatherSnapshot, WindImpact,
};

use super::normalize_bearing;

/// Bearing used when the waypoint has no aspect
const DEFAULT_CORRIDOR_BEARING: f64 = 180.0;
/// Precipitation in mm above which game stays put
const HEAVY_RAIN_MM: f64 = 5.0;

/// Expected arrival window for the current hour
#[must_use]
pub const fn arrival_window_for(hour: u32) -> &'static str {
    match hour {
        3..=9 => "05:30–08:00",
        14..=20 => "16:30–19:30",
        _ => "Variable",
    }
}

/// Effect of wind speed (km/h) on game movement
#[must_use]
pub fn wind_impact_for(wind_speed: f64) -> WindImpact {
    if wind_speed > 25.0 {
        WindImpact::Penalty
    } else if (8.0..=18.0).contains(&wind_speed) {
        WindImpact::Boost
    } else {
        WindImpact::Neutral
    }
}

/// Baseline activity by hour: high at dawn and dusk, low at midday
#[must_use]
pub const fn activity_for_hour(hour: u32) -> ActivityLevel {
    match hour {
        5..=8 | 17..=20 => ActivityLevel::High,
        11..=14 => ActivityLevel::Low,
        _ => ActivityLevel::Moderate,
    }
}

/// Predicted travel of game around the waypoint
#[must_use]
pub fn predict_game_movement(
    waypoint: &WaypointFeatures,
    weather: Option<&WeatherSnapshot>,
    now: DateTime<FixedOffset>,
) -> GameMovement {
    let primary = waypoint
        .aspect
        .map_or(DEFAULT_CORRIDOR_BEARING, |aspect| {
            normalize_bearing(aspect + 180.0)
        })
        .round();
    let secondary = normalize_bearing(primary + 90.0);

    let mut activity = activity_for_hour(now.hour());
    let mut wind_impact = WindImpact::Neutral;
    if let Some(weather) = weather {
        wind_impact = wind_impact_for(weather.current.wind_speed);
        if weather.front_type == FrontType::Cold {
            activity = activity.upgrade();
        }
        if weather.current.precipitation > HEAVY_RAIN_MM {
            activity = activity.downgrade();
        }
    }

    GameMovement {
        primary_corridor: primary as u16 % 360,
        secondary_corridor: secondary as u16 % 360,
        arrival_window: arrival_window_for(now.hour()).to_owned(),
        wind_impact,
        activity_level: activity,
    }
}
