// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Service names, provider endpoints, timeouts, persistence keys and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Constants module
//!
//! Application constants grouped by domain rather than kept in one flat list.

/// Service identification
pub mod service {
    /// Name used in logs and user agents
    pub const SERVICE_NAME: &str = "bionic-hunt";
    /// Crate version
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// External service names used in errors and circuit breakers
pub mod providers {
    /// Weather forecast provider
    pub const OPEN_METEO: &str = "open-meteo";
    /// Score adjustment inference service
    pub const AI_ADJUSTMENT: &str = "ai-adjustment";
}

/// Weather provider defaults
pub mod weather {
    /// Open-Meteo API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";
    /// Forecast days requested
    pub const FORECAST_DAYS: u8 = 2;
    /// Minimum hourly entries required from the provider
    pub const MIN_HOURLY_ENTRIES: usize = 24;
    /// Request timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Snapshot cache TTL in minutes
    pub const DEFAULT_CACHE_MINUTES: u64 = 30;
    /// Decimal places used when keying the cache by coordinates
    pub const CACHE_COORDINATE_PRECISION: i32 = 2;
    /// Locations kept in the snapshot cache before least-recently-used eviction
    pub const MAX_CACHED_LOCATIONS: usize = 1000;

    /// Current-conditions variables requested from the provider
    pub const CURRENT_VARIABLES: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
precipitation,weather_code,cloud_cover,pressure_msl,wind_speed_10m,wind_direction_10m,wind_gusts_10m";
    /// Hourly variables requested from the provider
    pub const HOURLY_VARIABLES: &str = "temperature_2m,relative_humidity_2m,precipitation_probability,\
precipitation,cloud_cover,wind_speed_10m,wind_direction_10m";
    /// Daily variables requested from the provider
    pub const DAILY_VARIABLES: &str = "sunrise,sunset,temperature_2m_min,temperature_2m_max";
}

/// Score adjustment service defaults
pub mod ai {
    /// Request timeout
    pub const DEFAULT_TIMEOUT_SECS: u64 = 8;
    /// Retries after the first attempt
    pub const DEFAULT_MAX_RETRIES: u32 = 0;
    /// Linear backoff step between retries
    pub const RETRY_BACKOFF_MS: u64 = 250;
    /// Consecutive failures before the circuit opens
    pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;
    /// Seconds before a recovery attempt
    pub const DEFAULT_RECOVERY_SECS: u64 = 60;
}

/// Configuration persistence
pub mod persistence {
    /// Key of the persisted scoring configuration blob
    pub const SCORING_CONFIG_KEY: &str = "bionic_scoring_config";
    /// Directory name under the platform config dir
    pub const CONFIG_DIR_NAME: &str = "bionic-hunt";
}

/// Environment variable names
pub mod env_config {
    /// Weather API base URL
    pub const WEATHER_BASE_URL: &str = "BIONIC_WEATHER_BASE_URL";
    /// Weather request timeout
    pub const WEATHER_TIMEOUT_SECS: &str = "BIONIC_WEATHER_TIMEOUT_SECS";
    /// Weather cache TTL
    pub const WEATHER_CACHE_MINUTES: &str = "BIONIC_WEATHER_CACHE_MINUTES";
    /// Weather fetch switch
    pub const WEATHER_ENABLED: &str = "BIONIC_WEATHER_ENABLED";
    /// Adjustment service endpoint (absent disables the call)
    pub const AI_ENDPOINT: &str = "BIONIC_AI_ENDPOINT";
    /// Adjustment service bearer key
    pub const AI_API_KEY: &str = "BIONIC_AI_API_KEY";
    /// Adjustment request timeout
    pub const AI_TIMEOUT_SECS: &str = "BIONIC_AI_TIMEOUT_SECS";
    /// Adjustment retries
    pub const AI_MAX_RETRIES: &str = "BIONIC_AI_MAX_RETRIES";
    /// Circuit breaker failure threshold
    pub const AI_FAILURE_THRESHOLD: &str = "BIONIC_AI_FAILURE_THRESHOLD";
    /// Circuit breaker recovery delay
    pub const AI_RECOVERY_SECS: &str = "BIONIC_AI_RECOVERY_SECS";
    /// Directory for persisted configuration
    pub const CONFIG_DIR: &str = "BIONIC_CONFIG_DIR";
}

/// Score bounds shared by every scorer
pub mod scores {
    /// Lower bound
    pub const MIN_SCORE: f64 = 0.0;
    /// Upper bound
    pub const MAX_SCORE: f64 = 100.0;
    /// Score assigned when an optional input is missing
    pub const NEUTRAL_SCORE: f64 = 50.0;
}
