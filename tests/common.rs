// ABOUTME: Shared test utilities and fixture builders for integration tests
// ABOUTME: Provides quiet logging, waypoint and forecast fixtures, and stub weather and adjustment providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(missing_docs)]
//! Shared test utilities for `bionic_hunt`

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use tracing::Level;

use bionic_core::errors::ProviderError;
use bionic_core::models::{
    CorridorData, CoverDensity, FeedingKind, FeedingZone, RawCurrent, RawDaily, RawForecast,
    RawHourly, RestingZone, StandType, ThermalConditions, TrailType, WaterType, WaypointFeatures,
};
use bionic_hunt::config::{ConfigStore, InMemoryPersistence};
use bionic_providers::{AdjustmentOutcome, AdjustmentProvider, AdjustmentRequest, WeatherProvider};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .try_init();
    });
}

/// Timestamp on 2025-10-18 at `hour`:00, UTC+2
pub fn local_time(hour: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(7200)
        .unwrap()
        .with_ymd_and_hms(2025, 10, 18, hour, 0, 0)
        .unwrap()
}

/// Minimal valid waypoint
pub fn minimal_features() -> WaypointFeatures {
    WaypointFeatures::new(46.2, 4.8, 320.0, 10.0, 150.0, 0.6)
}

/// Waypoint with every optional block populated and favourable values
pub fn rich_features() -> WaypointFeatures {
    let mut features = minimal_features();
    features.relative_elevation = Some(8.0);
    features.aspect = Some(180.0);
    features.water_distance = 80.0;
    features.has_confluence = true;
    features.is_riparian = true;
    features.water_type = Some(WaterType::Spring);
    features.ndvi = 0.75;
    features.stand_type = StandType::Oak;
    features.is_transition = true;
    features.adjacent_stands = vec![StandType::Conifer, StandType::Meadow];
    features.cover_density = Some(CoverDensity::Dense);
    features.thermal = Some(ThermalConditions {
        temperature: 8.0,
        wind_speed: 10.0,
        has_cover: true,
    });
    features.corridor = Some(CorridorData {
        on_corridor: true,
        width_meters: Some(15.0),
        trail_distance: Some(40.0),
        trail_type: Some(TrailType::Game),
        connectivity: 0.8,
    });
    features.feeding_zone = Some(FeedingZone {
        distance: 120.0,
        density: 0.8,
        kind: FeedingKind::Mast,
    });
    features.resting_zone = Some(RestingZone {
        distance: 150.0,
        cover_density: CoverDensity::Dense,
        has_escape_route: true,
        has_visual_cover: true,
        disturbance_free: true,
    });
    features.visibility = Some(60.0);
    features.human_pressure = Some(20.0);
    features.structure_score = Some(75.0);
    features
}

/// Raw waypoint JSON with French labels and neighbour elevations
pub const RAW_WAYPOINT_JSON: &str = r#"{
    "lat": 46.2,
    "lon": 4.8,
    "terrain": {
        "elevation": 320.0,
        "aspect": -90.0,
        "neighbor_elevations": [310.0, 315.0, 330.0, 325.0]
    },
    "vegetation": {
        "ndvi": 0.72,
        "stand": "Chênaie",
        "adjacent_stands": ["résineux", "prairie"],
        "canopy_cover": 80.0
    },
    "hydrography": {
        "nearest_water_distance": 140.0,
        "water_type": "ruisseau",
        "has_confluence": true
    },
    "human_pressure": 130.0
}"#;

/// Forecast payload with `hours` hourly entries starting 2025-10-18T00:00,
/// current time 06:00, constant temperature and wind
pub fn raw_forecast(hours: usize, temperature: f64, wind_speed: f64) -> RawForecast {
    let time = (0..hours)
        .map(|i| format!("2025-10-{:02}T{:02}:00", 18 + i / 24, i % 24))
        .collect();
    RawForecast {
        latitude: 46.2,
        longitude: 4.8,
        timezone: "Europe/Paris".to_owned(),
        utc_offset_seconds: 7200,
        current: RawCurrent {
            time: "2025-10-18T06:00".to_owned(),
            temperature_2m: Some(temperature),
            apparent_temperature: None,
            relative_humidity_2m: Some(80.0),
            precipitation: Some(0.0),
            weather_code: Some(3),
            cloud_cover: Some(70.0),
            pressure_msl: Some(1015.0),
            wind_speed_10m: Some(wind_speed),
            wind_direction_10m: Some(250.0),
            wind_gusts_10m: None,
        },
        hourly: RawHourly {
            time,
            temperature_2m: vec![Some(temperature); hours],
            relative_humidity_2m: vec![Some(80.0); hours],
            precipitation_probability: vec![Some(10.0); hours],
            precipitation: vec![Some(0.0); hours],
            cloud_cover: vec![Some(70.0); hours],
            wind_speed_10m: vec![Some(wind_speed); hours],
            wind_direction_10m: vec![Some(250.0); hours],
        },
        daily: RawDaily {
            time: vec!["2025-10-18".to_owned(), "2025-10-19".to_owned()],
            sunrise: vec!["2025-10-18T08:05".to_owned(), "2025-10-19T08:06".to_owned()],
            sunset: vec!["2025-10-18T18:55".to_owned(), "2025-10-19T18:53".to_owned()],
            temperature_2m_min: vec![Some(temperature - 3.0), Some(temperature - 2.0)],
            temperature_2m_max: vec![Some(temperature + 5.0), Some(temperature + 6.0)],
        },
    }
}

/// Constant forecast with `mm` of rain during `hour` on the first day
pub fn forecast_with_rain(hour: usize, mm: f64) -> RawForecast {
    let mut raw = raw_forecast(48, 8.0, 10.0);
    raw.hourly.precipitation[hour] = Some(mm);
    raw
}

/// Forecast seen from 06:00 with a wind jump at 07:00, heavy rain at 08:00,
/// a warm spell at 09:00 and a light shower at 10:00
pub fn unsettled_forecast() -> RawForecast {
    let mut raw = raw_forecast(48, 8.0, 10.0);
    raw.hourly.wind_speed_10m[7] = Some(25.0);
    raw.hourly.precipitation[8] = Some(3.0);
    raw.hourly.temperature_2m[9] = Some(14.0);
    raw.hourly.precipitation[10] = Some(0.5);
    raw
}

/// Forecast cooling 7.2°C between 06:00 and 12:00 with `rain_now` mm
/// falling at the current hour
pub fn cold_front_forecast(rain_now: f64) -> RawForecast {
    let mut raw = raw_forecast(48, 12.0, 10.0);
    raw.hourly.temperature_2m = (0..48)
        .map(|i: usize| Some(1.2f64.mul_add(-(i.saturating_sub(6).min(6) as f64), 12.0)))
        .collect();
    raw.current.precipitation = Some(rain_now);
    raw
}

/// Hot, gusty, clear forecast; gusts of 55 km/h push the thermal risk past 70
pub fn inversion_forecast(gusts: Option<f64>) -> RawForecast {
    let mut raw = raw_forecast(48, 35.0, 22.0);
    raw.current.cloud_cover = Some(10.0);
    raw.current.wind_gusts_10m = gusts;
    raw
}

/// In-memory configuration store holding defaults
pub fn memory_store() -> Arc<ConfigStore> {
    Arc::new(ConfigStore::with_defaults(Arc::new(InMemoryPersistence::new())))
}

/// Weather provider serving a fixed payload and counting calls
pub struct FixtureWeatherProvider {
    forecast: RawForecast,
    calls: AtomicUsize,
}

impl FixtureWeatherProvider {
    pub fn new(forecast: RawForecast) -> Self {
        Self {
            forecast,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for FixtureWeatherProvider {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch_forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<RawForecast, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.forecast.clone())
    }
}

/// Weather provider that always fails with a network error
pub struct FailingWeatherProvider;

#[async_trait]
impl WeatherProvider for FailingWeatherProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch_forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<RawForecast, ProviderError> {
        Err(ProviderError::NetworkError("connection refused".to_owned()))
    }
}

/// Adjustment provider returning a canned outcome and counting calls
pub struct StubAdjuster {
    outcome: AdjustmentOutcome,
    calls: AtomicUsize,
}

impl StubAdjuster {
    pub fn new(outcome: AdjustmentOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdjustmentProvider for StubAdjuster {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn request_adjustment(&self, _request: &AdjustmentRequest) -> AdjustmentOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
