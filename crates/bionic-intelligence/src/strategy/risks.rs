// ABOUTME: Risk evaluation for a stand: human pressure, thermal inversion and wind noise
// ABOUTME: Aggregates item severities and suggests an exit time by hour bucket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, FixedOffset, Timelike};

use bionic_core::models::{
    RiskAssessment, RiskItem, RiskKind, RiskLevel, TerritoryContext, WaypointFeatures,
    WeatherSnapshot,
};

fn graded(value: f64, high_above: f64, medium_above: f64) -> Option<RiskLevel> {
    if value > high_above {
        Some(RiskLevel::High)
    } else if value > medium_above {
        Some(RiskLevel::Medium)
    } else {
        None
    }
}

/// Suggested time to leave the stand
#[must_use]
pub const fn exit_time_for(hour: u32) -> &'static str {
    match hour {
        0..=11 => "10:00",
        12..=15 => "16:00",
        _ => "21:30",
    }
}

/// Risks present at the waypoint, most severe first
///
/// The territory's human pressure overrides the waypoint's own value.
#[must_use]
pub fn evaluate_risks(
    waypoint: &WaypointFeatures,
    weather: Option<&WeatherSnapshot>,
    territory: &TerritoryContext,
    now: DateTime<FixedOffset>,
) -> RiskAssessment {
    let mut risks = Vec::new();

    if let Some(pressure) = territory.human_pressure.or(waypoint.human_pressure) {
        if let Some(level) = graded(pressure, 60.0, 40.0) {
            risks.push(RiskItem {
                kind: RiskKind::HumanPressure,
                level,
                description: format!("Human pressure {pressure:.0}/100 near the stand"),
            });
        }
    }

    if let Some(weather) = weather {
        if let Some(level) = graded(weather.thermal_risk_level, 70.0, 50.0) {
            risks.push(RiskItem {
                kind: RiskKind::ThermalInversion,
                level,
                description: format!(
                    "Thermal inversion risk {:.0}/100, scent may pool",
                    weather.thermal_risk_level
                ),
            });
        }
        if weather.current.wind_speed < 5.0 {
            risks.push(RiskItem {
                kind: RiskKind::WindNoise,
                level: RiskLevel::High,
                description: "Calm air carries every sound".to_owned(),
            });
        }
    }

    risks.sort_by(|a, b| b.level.cmp(&a.level));
    let overall_level = risks
        .iter()
        .map(|r| r.level)
        .max()
        .unwrap_or(RiskLevel::Low);

    RiskAssessment {
        risks,
        overall_level,
        recommended_exit_time: exit_time_for(now.hour()).to_owned(),
    }
}
