// ABOUTME: Weather models for the forecast provider response and the derived snapshot
// ABOUTME: Raw Open-Meteo payload shapes, thermal/front enums, hunting conditions and windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// Provider payload
// ============================================================================

/// Forecast response as returned by the Open-Meteo `/forecast` endpoint
///
/// Times are local wall-clock strings (`2025-10-18T06:00`) in the zone named
/// by `timezone`; `utc_offset_seconds` anchors them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    /// Latitude of the grid cell
    pub latitude: f64,
    /// Longitude of the grid cell
    pub longitude: f64,
    /// IANA timezone name
    #[serde(default)]
    pub timezone: String,
    /// Offset of local time from UTC
    #[serde(default)]
    pub utc_offset_seconds: i32,
    /// Current conditions
    pub current: RawCurrent,
    /// Hourly series
    pub hourly: RawHourly,
    /// Daily series
    pub daily: RawDaily,
}

/// Current conditions block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrent {
    /// Local observation time
    pub time: String,
    /// Air temperature (°C)
    pub temperature_2m: Option<f64>,
    /// Apparent temperature (°C)
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    /// Relative humidity (%)
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    /// Precipitation (mm)
    #[serde(default)]
    pub precipitation: Option<f64>,
    /// WMO weather code
    #[serde(default)]
    pub weather_code: Option<u16>,
    /// Cloud cover (%)
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    /// Mean sea-level pressure (hPa)
    #[serde(default)]
    pub pressure_msl: Option<f64>,
    /// Wind speed (km/h)
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    /// Wind direction (degrees)
    #[serde(default)]
    pub wind_direction_10m: Option<f64>,
    /// Wind gusts (km/h)
    #[serde(default)]
    pub wind_gusts_10m: Option<f64>,
}

/// Hourly series, one entry per hour in every vector
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawHourly {
    /// Local times
    pub time: Vec<String>,
    /// Air temperature (°C)
    pub temperature_2m: Vec<Option<f64>>,
    /// Relative humidity (%)
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    /// Precipitation probability (%)
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
    /// Precipitation (mm)
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    /// Cloud cover (%)
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    /// Wind speed (km/h)
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    /// Wind direction (degrees)
    #[serde(default)]
    pub wind_direction_10m: Vec<Option<f64>>,
}

/// Daily series
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawDaily {
    /// Local dates
    pub time: Vec<String>,
    /// Local sunrise times
    #[serde(default)]
    pub sunrise: Vec<String>,
    /// Local sunset times
    #[serde(default)]
    pub sunset: Vec<String>,
    /// Minimum temperature (°C)
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    /// Maximum temperature (°C)
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
}

// ============================================================================
// Derived snapshot
// ============================================================================

/// Direction of local convective air movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalState {
    /// Air rising, scent carried upslope
    Ascending,
    /// Air sinking, scent carried downslope
    Descending,
    /// No marked movement
    Stable,
}

/// Short-term synoptic pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontType {
    /// Marked temperature drop
    Cold,
    /// Marked temperature rise
    Warm,
    /// Large hour-to-hour swings
    Unstable,
    /// No front
    None,
}

/// Bucket of the hunting-conditions score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionsRating {
    /// Score ≥ 70
    Excellent,
    /// Score ≥ 50
    Good,
    /// Score ≥ 30
    Moderate,
    /// Score < 30
    Poor,
}

/// Current conditions after normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Apparent temperature (°C)
    pub apparent_temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Mean sea-level pressure (hPa)
    pub pressure: Option<f64>,
    /// Precipitation (mm)
    pub precipitation: f64,
    /// Cloud cover (%)
    pub cloud_cover: f64,
    /// Wind speed (km/h)
    pub wind_speed: f64,
    /// Wind direction (degrees the wind blows from)
    pub wind_direction: f64,
    /// Wind gusts (km/h)
    pub wind_gusts: f64,
    /// WMO weather code
    pub weather_code: u16,
}

/// One hour of forecast with its hunting score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Local time
    pub time: DateTime<FixedOffset>,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Precipitation probability (%)
    pub precipitation_probability: f64,
    /// Precipitation (mm)
    pub precipitation: f64,
    /// Cloud cover (%)
    pub cloud_cover: f64,
    /// Wind speed (km/h)
    pub wind_speed: f64,
    /// Wind direction (degrees)
    pub wind_direction: f64,
    /// Hunting-conditions score for this hour
    pub hunting_score: f64,
}

/// Hunting-conditions assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntingConditions {
    /// Score in [0,100]
    pub score: f64,
    /// Bucket
    pub rating: ConditionsRating,
    /// Human-readable contributing factors
    pub factors: Vec<String>,
}

/// Contiguous run of favourable forecast hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalWindow {
    /// Time of the first hour
    pub start: DateTime<FixedOffset>,
    /// Time of the last hour
    pub end: DateTime<FixedOffset>,
    /// Mean hunting score over the window
    pub average_score: f64,
    /// Number of hours in the window
    pub hours: usize,
}

/// Weather snapshot for a waypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Latitude of the forecast cell
    pub latitude: f64,
    /// Longitude of the forecast cell
    pub longitude: f64,
    /// IANA timezone name
    pub timezone: String,
    /// Local time of the current observation
    pub current_time: DateTime<FixedOffset>,
    /// Current conditions
    pub current: CurrentConditions,
    /// Today's sunrise
    pub sunrise: Option<DateTime<FixedOffset>>,
    /// Today's sunset
    pub sunset: Option<DateTime<FixedOffset>>,
    /// Today's date
    pub date: Option<NaiveDate>,
    /// Today's minimum temperature (°C)
    pub temperature_min: Option<f64>,
    /// Today's maximum temperature (°C)
    pub temperature_max: Option<f64>,
    /// Thermal state at the current hour
    pub thermal_state: ThermalState,
    /// Thermal risk in [0,100]
    pub thermal_risk_level: f64,
    /// Front over the next six hours
    pub front_type: FrontType,
    /// Hourly forecast covering at least 24 hours
    pub hourly_forecast: Vec<HourlyForecast>,
    /// Hunting conditions now
    pub hunting_conditions: HuntingConditions,
    /// Best upcoming window, if any
    pub next_optimal_window: Option<OptimalWindow>,
}
