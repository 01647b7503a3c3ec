// ABOUTME: Open-Meteo forecast client requesting current, hourly and daily variables
// ABOUTME: Maps transport, status and payload failures onto ProviderError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use bionic_core::constants::providers::OPEN_METEO;
use bionic_core::constants::weather::{
    CURRENT_VARIABLES, DAILY_VARIABLES, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, FORECAST_DAYS,
    HOURLY_VARIABLES, MIN_HOURLY_ENTRIES,
};
use bionic_core::errors::provider::ProviderError;
use bionic_core::models::RawForecast;

use super::WeatherProvider;
use crate::http_client::client_with_timeout;

/// Forecast client for the public Open-Meteo API
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(
            DEFAULT_BASE_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }
}

impl OpenMeteoProvider {
    /// Client for `base_url` (without trailing `/forecast`) with a request deadline
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: client_with_timeout(timeout),
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
        }
    }

    /// Forecast endpoint URL
    #[must_use]
    pub fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }

    fn transport_error(&self, error: &reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout {
                provider: OPEN_METEO.to_owned(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            ProviderError::NetworkError(format!("{OPEN_METEO}: {error}"))
        }
    }
}

/// Decode and sanity-check a forecast body
///
/// # Errors
///
/// Returns `ParseError` for malformed JSON and `InvalidData` when the hourly
/// series is shorter than a day or its arrays disagree in length.
pub fn parse_forecast(body: &str) -> Result<RawForecast, ProviderError> {
    let forecast: RawForecast =
        serde_json::from_str(body).map_err(|source| ProviderError::ParseError {
            provider: OPEN_METEO.to_owned(),
            field: "forecast",
            source,
        })?;

    let hours = forecast.hourly.time.len();
    if hours < MIN_HOURLY_ENTRIES {
        return Err(ProviderError::InvalidData {
            provider: OPEN_METEO.to_owned(),
            message: format!("expected at least {MIN_HOURLY_ENTRIES} hourly entries, got {hours}"),
        });
    }
    if forecast.hourly.temperature_2m.len() != hours {
        return Err(ProviderError::InvalidData {
            provider: OPEN_METEO.to_owned(),
            message: "hourly arrays have mismatched lengths".to_owned(),
        });
    }
    Ok(forecast)
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &'static str {
        OPEN_METEO
    }

    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecast, ProviderError> {
        debug!(latitude, longitude, "Fetching Open-Meteo forecast");

        let forecast_days = FORECAST_DAYS.to_string();
        let response = self
            .client
            .get(self.forecast_url())
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_VARIABLES.to_owned()),
                ("hourly", HOURLY_VARIABLES.to_owned()),
                ("daily", DAILY_VARIABLES.to_owned()),
                ("timezone", "auto".to_owned()),
                ("forecast_days", forecast_days),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(ProviderError::ApiError {
                provider: OPEN_METEO.to_owned(),
                status_code: status.as_u16(),
                message,
                retryable: ProviderError::is_retryable_status(status.as_u16()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;
        parse_forecast(&body)
    }
}
