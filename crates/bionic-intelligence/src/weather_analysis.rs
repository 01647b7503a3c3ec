// ABOUTME: Weather analysis deriving thermals, fronts, risk and hunting conditions from forecasts
// ABOUTME: Builds the WeatherSnapshot from a raw provider payload without any I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Weather Analysis
//!
//! Pure derivations over a forecast:
//! - thermal state from the temperature trend around an hour
//! - thermal risk level (0-100) from temperature, wind, gusts, thermals and cloud
//! - front type over the next six hours
//! - hunting-conditions score per hour and the best upcoming window
//!
//! [`build_weather_snapshot`] turns an Open-Meteo payload into a
//! [`WeatherSnapshot`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

use bionic_core::constants::providers::OPEN_METEO;
use bionic_core::constants::scores::{MAX_SCORE, MIN_SCORE};
use bionic_core::constants::weather::MIN_HOURLY_ENTRIES;
use bionic_core::errors::provider::ProviderError;
use bionic_core::models::{
    ConditionsRating, CurrentConditions, FrontType, HourlyForecast, HuntingConditions,
    OptimalWindow, RawForecast, ThermalState, WeatherSnapshot,
};

use crate::scoring::elementary::round1;

/// Trend magnitude separating a thermal movement from stable air (°C)
const THERMAL_TREND_THRESHOLD: f64 = 1.0;
/// Hours ahead inspected for a front
const FRONT_WINDOW_HOURS: usize = 6;
/// Net change marking a cold or warm front (°C)
const FRONT_DELTA_THRESHOLD: f64 = 5.0;
/// Cumulative hour-to-hour variation marking unstable weather (°C)
const FRONT_VARIATION_THRESHOLD: f64 = 8.0;
/// Hourly hunting score at or above which an hour is favourable
pub const OPTIMAL_HOUR_SCORE: f64 = 60.0;

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Thermal state at `index` from the surrounding hourly temperatures
///
/// Trend is `(curr - prev) + (next - curr)`; missing neighbours count as
/// no change.
#[must_use]
pub fn calculate_thermal_state(temperatures: &[f64], index: usize) -> ThermalState {
    let Some(&current) = temperatures.get(index) else {
        return ThermalState::Stable;
    };
    let previous = index
        .checked_sub(1)
        .and_then(|i| temperatures.get(i))
        .copied()
        .unwrap_or(current);
    let next = temperatures.get(index + 1).copied().unwrap_or(current);
    let trend = (current - previous) + (next - current);
    if trend > THERMAL_TREND_THRESHOLD {
        ThermalState::Ascending
    } else if trend < -THERMAL_TREND_THRESHOLD {
        ThermalState::Descending
    } else {
        ThermalState::Stable
    }
}

/// Thermal risk level in [0,100]
#[must_use]
pub fn calculate_thermal_risk_level(current: &CurrentConditions, thermal: ThermalState) -> f64 {
    let mut risk = 0.0;

    let t = current.temperature;
    if !(-10.0..=30.0).contains(&t) {
        risk += 30.0;
    } else if !(-5.0..=25.0).contains(&t) {
        risk += 15.0;
    }

    risk += match current.wind_speed {
        w if w > 30.0 => 25.0,
        w if w > 20.0 => 15.0,
        w if w > 15.0 => 8.0,
        _ => 0.0,
    };

    risk += match current.wind_gusts {
        g if g > 50.0 => 20.0,
        g if g > 35.0 => 10.0,
        _ => 0.0,
    };

    if thermal == ThermalState::Ascending {
        risk += 15.0;
    }
    if current.cloud_cover < 20.0 {
        risk += 10.0;
    }

    f64::min(risk, MAX_SCORE)
}

/// Front over the next six hours starting at `index`
#[must_use]
pub fn detect_front_type(temperatures: &[f64], index: usize) -> FrontType {
    let end = (index + FRONT_WINDOW_HOURS + 1).min(temperatures.len());
    let Some(window) = temperatures.get(index..end) else {
        return FrontType::None;
    };
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return FrontType::None;
    };
    let delta = last - first;
    if delta < -FRONT_DELTA_THRESHOLD {
        return FrontType::Cold;
    }
    if delta > FRONT_DELTA_THRESHOLD {
        return FrontType::Warm;
    }
    let variation: f64 = window.windows(2).map(|pair| (pair[1] - pair[0]).abs()).sum();
    if variation > FRONT_VARIATION_THRESHOLD {
        FrontType::Unstable
    } else {
        FrontType::None
    }
}

/// Inputs of the hunting-conditions score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HuntingInputs {
    /// Wind speed (km/h)
    pub wind_speed: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Precipitation (mm)
    pub precipitation: f64,
    /// Thermal state
    pub thermal_state: ThermalState,
    /// Front type
    pub front_type: FrontType,
    /// Sea-level pressure (hPa), when known
    pub pressure: Option<f64>,
}

/// Bucket a hunting-conditions score
#[must_use]
pub fn conditions_rating(score: f64) -> ConditionsRating {
    if score >= 70.0 {
        ConditionsRating::Excellent
    } else if score >= 50.0 {
        ConditionsRating::Good
    } else if score >= 30.0 {
        ConditionsRating::Moderate
    } else {
        ConditionsRating::Poor
    }
}

/// Score hunting conditions from a baseline of 50
#[must_use]
pub fn analyze_hunting_conditions(inputs: &HuntingInputs) -> HuntingConditions {
    let mut score = 50.0;
    let mut factors = Vec::new();
    let mut add = |delta: f64, factor: String| {
        score += delta;
        factors.push(factor);
    };

    let wind = inputs.wind_speed;
    if (5.0..=15.0).contains(&wind) {
        add(15.0, format!("Ideal wind ({wind:.0} km/h)"));
    } else if wind < 5.0 {
        add(-10.0, format!("Wind too light ({wind:.0} km/h), noise carries"));
    } else if wind > 25.0 {
        add(-20.0, format!("Strong wind ({wind:.0} km/h)"));
    }

    let temp = inputs.temperature;
    if (-5.0..=15.0).contains(&temp) {
        add(10.0, format!("Favourable temperature ({temp:.0}°C)"));
    } else if !(-15.0..=25.0).contains(&temp) {
        add(-15.0, format!("Extreme temperature ({temp:.0}°C)"));
    }

    let precip = inputs.precipitation;
    if (0.0..=2.0).contains(&precip) {
        add(10.0, "Dry or light precipitation".to_owned());
    } else if precip > 5.0 {
        add(-15.0, format!("Heavy precipitation ({precip:.1} mm)"));
    }

    match inputs.thermal_state {
        ThermalState::Descending => add(10.0, "Descending thermals".to_owned()),
        ThermalState::Ascending => add(-10.0, "Ascending thermals carry scent".to_owned()),
        ThermalState::Stable => {}
    }

    match inputs.front_type {
        FrontType::Cold => add(15.0, "Cold front triggers movement".to_owned()),
        FrontType::Unstable => add(-10.0, "Unstable weather".to_owned()),
        FrontType::Warm | FrontType::None => {}
    }

    match inputs.pressure {
        Some(p) if p > 1020.0 => add(5.0, format!("High pressure ({p:.0} hPa)")),
        Some(p) if p < 1000.0 => add(-5.0, format!("Low pressure ({p:.0} hPa)")),
        _ => {}
    }

    let score = round1(score.clamp(MIN_SCORE, MAX_SCORE));
    HuntingConditions {
        score,
        rating: conditions_rating(score),
        factors,
    }
}

/// Best run of consecutive hours scoring at least 60
///
/// Runs are compared by average score; on a tie the earliest run wins.
#[must_use]
pub fn find_next_optimal_window(hourly: &[HourlyForecast]) -> Option<OptimalWindow> {
    let mut best: Option<(f64, OptimalWindow)> = None;
    let mut run: Vec<&HourlyForecast> = Vec::new();

    let mut close_run = |run: &mut Vec<&HourlyForecast>| {
        if let (Some(first), Some(last)) = (run.first(), run.last()) {
            let average = run.iter().map(|h| h.hunting_score).sum::<f64>() / run.len() as f64;
            let better = match &best {
                Some((best_average, _)) => average > *best_average,
                None => true,
            };
            if better {
                best = Some((
                    average,
                    OptimalWindow {
                        start: first.time,
                        end: last.time,
                        average_score: round1(average),
                        hours: run.len(),
                    },
                ));
            }
        }
        run.clear();
    };

    for hour in hourly {
        if hour.hunting_score >= OPTIMAL_HOUR_SCORE {
            run.push(hour);
        } else {
            close_run(&mut run);
        }
    }
    close_run(&mut run);
    best.map(|(_, window)| window)
}

fn invalid(message: impl Into<String>) -> ProviderError {
    ProviderError::InvalidData {
        provider: OPEN_METEO.to_owned(),
        message: message.into(),
    }
}

fn parse_local_time(value: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>, ProviderError> {
    let naive = NaiveDateTime::parse_from_str(value, LOCAL_TIME_FORMAT)
        .map_err(|e| invalid(format!("bad timestamp '{value}': {e}")))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| invalid(format!("ambiguous timestamp '{value}'")))
}

fn series_value(series: &[Option<f64>], index: usize) -> Option<f64> {
    series.get(index).copied().flatten()
}

/// Derive a snapshot from a raw forecast payload
///
/// # Errors
///
/// Returns `ProviderError::InvalidData` when timestamps do not parse, the
/// current temperature is missing or fewer than 24 hourly entries arrive.
pub fn build_weather_snapshot(raw: &RawForecast) -> Result<WeatherSnapshot, ProviderError> {
    let offset = FixedOffset::east_opt(raw.utc_offset_seconds)
        .ok_or_else(|| invalid(format!("bad utc offset {}", raw.utc_offset_seconds)))?;
    let current_time = parse_local_time(&raw.current.time, offset)?;
    let current = current_conditions(raw)?;

    let hourly = &raw.hourly;
    if hourly.time.len() < MIN_HOURLY_ENTRIES {
        return Err(invalid(format!(
            "expected at least {MIN_HOURLY_ENTRIES} hourly entries, got {}",
            hourly.time.len()
        )));
    }

    // Gaps in the temperature series carry the last known value forward.
    let mut last_temperature = current.temperature;
    let temperatures: Vec<f64> = (0..hourly.time.len())
        .map(|i| {
            last_temperature = series_value(&hourly.temperature_2m, i).unwrap_or(last_temperature);
            last_temperature
        })
        .collect();

    let times = hourly
        .time
        .iter()
        .map(|t| parse_local_time(t, offset))
        .collect::<Result<Vec<_>, _>>()?;

    let hourly_forecast: Vec<HourlyForecast> = times
        .iter()
        .enumerate()
        .map(|(i, time)| {
            let wind_speed = series_value(&hourly.wind_speed_10m, i).unwrap_or(0.0);
            let precipitation = series_value(&hourly.precipitation, i).unwrap_or(0.0);
            let conditions = analyze_hunting_conditions(&HuntingInputs {
                wind_speed,
                temperature: temperatures[i],
                precipitation,
                thermal_state: calculate_thermal_state(&temperatures, i),
                front_type: detect_front_type(&temperatures, i),
                pressure: None,
            });
            HourlyForecast {
                time: *time,
                temperature: temperatures[i],
                humidity: series_value(&hourly.relative_humidity_2m, i).unwrap_or(0.0),
                precipitation_probability: series_value(&hourly.precipitation_probability, i)
                    .unwrap_or(0.0),
                precipitation,
                cloud_cover: series_value(&hourly.cloud_cover, i).unwrap_or(0.0),
                wind_speed,
                wind_direction: series_value(&hourly.wind_direction_10m, i).unwrap_or(0.0),
                hunting_score: conditions.score,
            }
        })
        .collect();

    let current_index = times
        .iter()
        .rposition(|t| *t <= current_time)
        .unwrap_or(0);

    let thermal_state = calculate_thermal_state(&temperatures, current_index);
    let front_type = detect_front_type(&temperatures, current_index);
    let hunting_conditions = analyze_hunting_conditions(&HuntingInputs {
        wind_speed: current.wind_speed,
        temperature: current.temperature,
        precipitation: current.precipitation,
        thermal_state,
        front_type,
        pressure: current.pressure,
    });
    let next_optimal_window = hourly_forecast
        .get(current_index..)
        .and_then(find_next_optimal_window);

    let daily = &raw.daily;
    let date = daily
        .time
        .first()
        .and_then(|d| NaiveDate::parse_from_str(d, LOCAL_DATE_FORMAT).ok());
    let sunrise = daily
        .sunrise
        .first()
        .map(|s| parse_local_time(s, offset))
        .transpose()?;
    let sunset = daily
        .sunset
        .first()
        .map(|s| parse_local_time(s, offset))
        .transpose()?;

    Ok(WeatherSnapshot {
        latitude: raw.latitude,
        longitude: raw.longitude,
        timezone: raw.timezone.clone(),
        current_time,
        current,
        sunrise,
        sunset,
        date,
        temperature_min: series_value(&daily.temperature_2m_min, 0),
        temperature_max: series_value(&daily.temperature_2m_max, 0),
        thermal_state,
        thermal_risk_level: calculate_thermal_risk_level(&current, thermal_state),
        front_type,
        hourly_forecast,
        hunting_conditions,
        next_optimal_window,
    })
}

fn current_conditions(raw: &RawForecast) -> Result<CurrentConditions, ProviderError> {
    let c = &raw.current;
    let temperature = c
        .temperature_2m
        .ok_or_else(|| invalid("current temperature missing"))?;
    let wind_speed = c.wind_speed_10m.unwrap_or(0.0);
    Ok(CurrentConditions {
        temperature,
        apparent_temperature: c.apparent_temperature.unwrap_or(temperature),
        humidity: c.relative_humidity_2m.unwrap_or(0.0),
        pressure: c.pressure_msl,
        precipitation: c.precipitation.unwrap_or(0.0),
        cloud_cover: c.cloud_cover.unwrap_or(0.0),
        wind_speed,
        wind_direction: c.wind_direction_10m.unwrap_or(0.0),
        wind_gusts: c.wind_gusts_10m.unwrap_or(wind_speed),
        weather_code: c.weather_code.unwrap_or(0),
    })
}
