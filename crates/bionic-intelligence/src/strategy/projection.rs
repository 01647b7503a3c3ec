// ABOUTME: Time-of-day projection of a stand score over the next hours
// ABOUTME: Applies hour multipliers and forecast wind, temperature and rain adjustments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, Duration, FixedOffset, Timelike};

use bionic_core::models::{HourlyForecast, StandProjection, Trend, WeatherSnapshot};

use crate::scoring::elementary::{clamp_score, round1};

/// Hours scanned for the peak
const PEAK_HORIZON_HOURS: u32 = 12;
/// Projection change separating a trend from stable
const TREND_THRESHOLD: f64 = 5.0;

/// Multiplier applied to a score at a given hour
#[must_use]
pub const fn time_of_day_multiplier(hour: u32) -> f64 {
    match hour {
        5..=8 => 1.15,
        17..=20 => 1.12,
        11..=14 => 0.95,
        21..=23 | 0..=4 => 0.85,
        _ => 1.0,
    }
}

fn hour_index(hourly: &[HourlyForecast], at: DateTime<FixedOffset>) -> Option<usize> {
    hourly.iter().rposition(|h| h.time <= at)
}

/// Points added to the base score for conditions `offset` hours ahead
#[must_use]
pub fn forecast_adjustment(
    weather: Option<&WeatherSnapshot>,
    now: DateTime<FixedOffset>,
    offset: usize,
) -> f64 {
    let Some(weather) = weather else {
        return 0.0;
    };
    let hourly = &weather.hourly_forecast;
    let Some(now_index) = hour_index(hourly, now) else {
        return 0.0;
    };
    let (Some(current), Some(target)) = (hourly.get(now_index), hourly.get(now_index + offset))
    else {
        return 0.0;
    };

    let mut adjustment = 0.0;
    if target.wind_speed - current.wind_speed > 10.0 {
        adjustment -= 5.0;
    }
    if (target.temperature - current.temperature).abs() > 5.0 {
        adjustment -= 3.0;
    }
    if target.precipitation > 2.0 {
        adjustment -= 8.0;
    } else if target.precipitation > 0.0 {
        adjustment += 2.0;
    }
    adjustment
}

fn project_at(
    score: f64,
    weather: Option<&WeatherSnapshot>,
    now: DateTime<FixedOffset>,
    offset: u32,
) -> (DateTime<FixedOffset>, f64) {
    let target = now + Duration::hours(i64::from(offset));
    let adjusted = score + forecast_adjustment(weather, now, offset as usize);
    let projected = round1(clamp_score(adjusted * time_of_day_multiplier(target.hour())));
    (target, projected)
}

/// Project a score at now, +1h, +3h and find the peak over the next 12 hours
#[must_use]
pub fn project_stand_score(
    score: f64,
    weather: Option<&WeatherSnapshot>,
    now: DateTime<FixedOffset>,
) -> StandProjection {
    let current = round1(clamp_score(score * time_of_day_multiplier(now.hour())));
    let (_, in_1h) = project_at(score, weather, now, 1);
    let (_, in_3h) = project_at(score, weather, now, 3);

    let trend = if in_3h - current >= TREND_THRESHOLD {
        Trend::Improving
    } else if current - in_3h >= TREND_THRESHOLD {
        Trend::Degrading
    } else {
        Trend::Stable
    };

    let (peak_time, peak_score) = (1..=PEAK_HORIZON_HOURS)
        .map(|offset| project_at(score, weather, now, offset))
        .fold((now, f64::MIN), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    StandProjection {
        current,
        in_1h,
        in_3h,
        trend,
        peak_time,
        peak_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 10, 18, hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_multipliers() {
        assert!((time_of_day_multiplier(6) - 1.15).abs() < f64::EPSILON);
        assert!((time_of_day_multiplier(18) - 1.12).abs() < f64::EPSILON);
        assert!((time_of_day_multiplier(12) - 0.95).abs() < f64::EPSILON);
        assert!((time_of_day_multiplier(23) - 0.85).abs() < f64::EPSILON);
        assert!((time_of_day_multiplier(10) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_projection_without_weather_follows_the_clock() {
        let projection = project_stand_score(60.0, None, at(4));
        assert!((projection.current - 51.0).abs() < 1e-9);
        assert!((projection.in_1h - 69.0).abs() < 1e-9);
        assert_eq!(projection.trend, Trend::Improving);
        assert!((projection.peak_score - 69.0).abs() < 1e-9);
        assert_eq!(projection.peak_time, at(5));
    }
}
