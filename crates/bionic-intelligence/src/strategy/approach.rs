// ABOUTME: Approach path analysis for reaching a stand without being detected
// ABOUTME: Derives stealth, scent and visual risk, heading and detour distance from wind and light
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, FixedOffset, Timelike};

use bionic_core::models::{ApproachPath, RiskLevel, ThermalState, WeatherSnapshot};

use super::{normalize_bearing, wind_bearing};
use crate::calendar::{time_of_day_for_hour, TimeOfDay};
use crate::scoring::elementary::clamp_score;

const BASE_STEALTH: f64 = 80.0;
const BASE_DISTANCE_METERS: u32 = 200;
const OVERCAST_CLOUD_COVER: f64 = 60.0;

/// Scent risk follows the thermal flow: rising air carries scent up the slope
#[must_use]
pub const fn scent_risk_for(thermal_state: Option<ThermalState>) -> RiskLevel {
    match thermal_state {
        Some(ThermalState::Ascending) => RiskLevel::High,
        Some(ThermalState::Descending) => RiskLevel::Low,
        Some(ThermalState::Stable) | None => RiskLevel::Medium,
    }
}

/// Visual exposure by part of day, reduced one step under overcast skies
#[must_use]
pub fn visual_risk_for(hour: u32, cloud_cover: Option<f64>) -> RiskLevel {
    let overcast = cloud_cover.is_some_and(|c| c > OVERCAST_CLOUD_COVER);
    match (time_of_day_for_hour(hour), overcast) {
        (TimeOfDay::Night, _) | (TimeOfDay::Dawn | TimeOfDay::Dusk, true) => RiskLevel::Low,
        (TimeOfDay::Dawn | TimeOfDay::Dusk, false) | (TimeOfDay::Day, true) => RiskLevel::Medium,
        (TimeOfDay::Day, false) => RiskLevel::High,
    }
}

fn stealth_score(weather: Option<&WeatherSnapshot>) -> f64 {
    let Some(weather) = weather else {
        return BASE_STEALTH;
    };
    let wind = weather.current.wind_speed;
    let mut stealth = BASE_STEALTH;
    if (8.0..=18.0).contains(&wind) {
        stealth += 10.0;
    } else if wind < 5.0 {
        stealth -= 15.0;
    }
    if weather.current.cloud_cover > OVERCAST_CLOUD_COVER {
        stealth += 5.0;
    }
    clamp_score(stealth)
}

/// Recommended approach, walking into the wind
#[must_use]
pub fn analyze_approach_path(
    weather: Option<&WeatherSnapshot>,
    now: DateTime<FixedOffset>,
) -> ApproachPath {
    let scent_risk = scent_risk_for(weather.map(|w| w.thermal_state));
    let visual_risk = visual_risk_for(now.hour(), weather.map(|w| w.current.cloud_cover));

    let mut distance = BASE_DISTANCE_METERS;
    match scent_risk {
        RiskLevel::High => distance += 100,
        RiskLevel::Low => distance -= 50,
        RiskLevel::Medium => {}
    }
    if visual_risk == RiskLevel::High {
        distance += 50;
    }

    ApproachPath {
        stealth_score: stealth_score(weather),
        scent_risk,
        visual_risk,
        recommended_direction: normalize_bearing(wind_bearing(weather) + 180.0),
        distance_meters: distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_risk_by_light() {
        assert_eq!(visual_risk_for(12, None), RiskLevel::High);
        assert_eq!(visual_risk_for(12, Some(80.0)), RiskLevel::Medium);
        assert_eq!(visual_risk_for(6, None), RiskLevel::Medium);
        assert_eq!(visual_risk_for(6, Some(80.0)), RiskLevel::Low);
        assert_eq!(visual_risk_for(23, None), RiskLevel::Low);
    }

    #[test]
    fn test_scent_risk_follows_thermals() {
        assert_eq!(scent_risk_for(Some(ThermalState::Ascending)), RiskLevel::High);
        assert_eq!(scent_risk_for(Some(ThermalState::Descending)), RiskLevel::Low);
        assert_eq!(scent_risk_for(None), RiskLevel::Medium);
    }
}
