// ABOUTME: Environment-only runtime configuration for the weather and AI-adjustment integrations
// ABOUTME: Parses BIONIC_* variables with defaults and rejects malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use bionic_core::constants::env_config::{
    AI_API_KEY, AI_ENDPOINT, AI_FAILURE_THRESHOLD, AI_MAX_RETRIES, AI_RECOVERY_SECS,
    AI_TIMEOUT_SECS, CONFIG_DIR, WEATHER_BASE_URL, WEATHER_CACHE_MINUTES, WEATHER_ENABLED,
    WEATHER_TIMEOUT_SECS,
};
use bionic_core::constants::{ai, persistence, weather};
use bionic_core::errors::{AppError, AppResult};
use bionic_providers::AdjustmentClientConfig;

/// Weather provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherServiceConfig {
    /// Whether forecasts are fetched at all
    pub enabled: bool,
    /// Open-Meteo base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Snapshot cache TTL
    pub cache_ttl: Duration,
}

impl Default for WeatherServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: weather::DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(weather::DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(weather::DEFAULT_CACHE_MINUTES * 60),
        }
    }
}

/// Adjustment service settings; `None` endpoint disables level 2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiServiceConfig {
    /// Endpoint URL
    pub endpoint: Option<String>,
    /// Bearer key
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Failures before the circuit opens
    pub failure_threshold: u32,
    /// Cool-down of an open circuit
    pub recovery_timeout: Duration,
}

impl Default for AiServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout: Duration::from_secs(ai::DEFAULT_TIMEOUT_SECS),
            max_retries: ai::DEFAULT_MAX_RETRIES,
            failure_threshold: ai::DEFAULT_FAILURE_THRESHOLD,
            recovery_timeout: Duration::from_secs(ai::DEFAULT_RECOVERY_SECS),
        }
    }
}

impl AiServiceConfig {
    /// Client settings when an endpoint is configured
    #[must_use]
    pub fn client_config(&self) -> Option<AdjustmentClientConfig> {
        self.endpoint.as_ref().map(|endpoint| AdjustmentClientConfig {
            endpoint: endpoint.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
            max_retries: self.max_retries,
            failure_threshold: self.failure_threshold,
            recovery_timeout: self.recovery_timeout,
        })
    }
}

/// Process-wide runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Weather integration
    pub weather: WeatherServiceConfig,
    /// AI adjustment integration
    pub ai: AiServiceConfig,
    /// Directory holding persisted scoring configuration
    pub config_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            weather: WeatherServiceConfig::default(),
            ai: AiServiceConfig::default(),
            config_dir: default_config_dir(),
        }
    }
}

/// Platform config directory for persisted state
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(persistence::CONFIG_DIR_NAME))
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    non_empty(key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|_| AppError::config_invalid(format!("Invalid {key} value: '{raw}'")))
    })
}

fn parse_bool(key: &str, default: bool) -> AppResult<bool> {
    match non_empty(key).map(|v| v.to_ascii_lowercase()).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(AppError::config_invalid(format!(
            "Invalid {key} value: '{other}'"
        ))),
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a variable is set but cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            weather: WeatherServiceConfig {
                enabled: parse_bool(WEATHER_ENABLED, true)?,
                base_url: non_empty(WEATHER_BASE_URL)
                    .unwrap_or_else(|| weather::DEFAULT_BASE_URL.to_owned()),
                timeout: Duration::from_secs(parse_var(
                    WEATHER_TIMEOUT_SECS,
                    weather::DEFAULT_TIMEOUT_SECS,
                )?),
                cache_ttl: Duration::from_secs(
                    parse_var(WEATHER_CACHE_MINUTES, weather::DEFAULT_CACHE_MINUTES)? * 60,
                ),
            },
            ai: AiServiceConfig {
                endpoint: non_empty(AI_ENDPOINT),
                api_key: non_empty(AI_API_KEY),
                timeout: Duration::from_secs(parse_var(AI_TIMEOUT_SECS, ai::DEFAULT_TIMEOUT_SECS)?),
                max_retries: parse_var(AI_MAX_RETRIES, ai::DEFAULT_MAX_RETRIES)?,
                failure_threshold: parse_var(AI_FAILURE_THRESHOLD, ai::DEFAULT_FAILURE_THRESHOLD)?,
                recovery_timeout: Duration::from_secs(parse_var(
                    AI_RECOVERY_SECS,
                    ai::DEFAULT_RECOVERY_SECS,
                )?),
            },
            config_dir: non_empty(CONFIG_DIR)
                .map(PathBuf::from)
                .or_else(default_config_dir),
        };

        if config.ai.failure_threshold == 0 {
            return Err(AppError::config_invalid(format!(
                "{AI_FAILURE_THRESHOLD} must be at least 1"
            )));
        }

        info!(
            weather_enabled = config.weather.enabled,
            ai_enabled = config.ai.endpoint.is_some(),
            "Loaded runtime configuration from environment"
        );
        Ok(config)
    }

    /// One-line human summary, without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "weather: {} ({}s timeout, {}min cache) | ai: {} | config dir: {}",
            if self.weather.enabled { "enabled" } else { "disabled" },
            self.weather.timeout.as_secs(),
            self.weather.cache_ttl.as_secs() / 60,
            self.ai.endpoint.as_deref().unwrap_or("disabled"),
            self.config_dir
                .as_ref()
                .map_or_else(|| "none".to_owned(), |p| p.display().to_string()),
        )
    }
}
