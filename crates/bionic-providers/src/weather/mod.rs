// ABOUTME: Weather forecast provider abstraction
// ABOUTME: Returns the raw forecast payload; analysis happens in the pure intelligence crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Open-Meteo forecast API client
pub mod open_meteo;

use async_trait::async_trait;

use bionic_core::errors::provider::ProviderError;
use bionic_core::models::RawForecast;

/// Source of point forecasts
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Provider identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Current, hourly and daily forecast at a coordinate
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` on transport failure, non-success status or
    /// a payload that does not match the forecast contract.
    async fn fetch_forecast(&self, latitude: f64, longitude: f64)
        -> Result<RawForecast, ProviderError>;
}
