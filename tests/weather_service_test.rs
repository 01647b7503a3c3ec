// ABOUTME: Integration tests for the caching weather service
// ABOUTME: Covers cache hits by rounded coordinates, TTL expiry, disabled mode and provider failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use bionic_core::errors::ErrorCode;
use bionic_hunt::weather::WeatherService;
use bionic_providers::{OpenMeteoProvider, WeatherProvider};

use common::{FailingWeatherProvider, FixtureWeatherProvider};

fn fixture() -> Arc<FixtureWeatherProvider> {
    Arc::new(FixtureWeatherProvider::new(common::raw_forecast(48, 8.0, 10.0)))
}

#[tokio::test]
async fn test_nearby_requests_share_a_cache_entry() {
    common::init_test_logging();
    let provider = fixture();
    let service = WeatherService::new(
        Arc::clone(&provider) as Arc<dyn WeatherProvider>,
        true,
        Duration::from_secs(600),
    );

    let first = service.fetch_weather_data(46.201, 4.801).await.unwrap();
    let second = service.fetch_weather_data(46.203, 4.799).await.unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(first, second);
    assert_eq!(service.cached_locations().await, 1);

    service.fetch_weather_data(47.5, 4.8).await.unwrap();
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_expired_entries_are_refetched() {
    let provider = fixture();
    let service = WeatherService::new(
        Arc::clone(&provider) as Arc<dyn WeatherProvider>,
        true,
        Duration::ZERO,
    );
    service.fetch_weather_data(46.2, 4.8).await.unwrap();
    service.fetch_weather_data(46.2, 4.8).await.unwrap();
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_cache_is_bounded_by_capacity() {
    let provider = fixture();
    let service = WeatherService::with_capacity(
        Arc::clone(&provider) as Arc<dyn WeatherProvider>,
        true,
        Duration::from_secs(600),
        NonZeroUsize::new(2).unwrap(),
    );

    for latitude in [45.0, 45.5, 46.0, 46.5, 47.0] {
        service.fetch_weather_data(latitude, 4.8).await.unwrap();
        assert!(service.cached_locations().await <= 2);
    }
    assert_eq!(provider.calls(), 5);

    // Most recent location is still served from cache, the oldest was evicted
    service.fetch_weather_data(47.0, 4.8).await.unwrap();
    assert_eq!(provider.calls(), 5);
    service.fetch_weather_data(45.0, 4.8).await.unwrap();
    assert_eq!(provider.calls(), 6);
    assert_eq!(service.cached_locations().await, 2);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let provider = fixture();
    let service = WeatherService::new(
        Arc::clone(&provider) as Arc<dyn WeatherProvider>,
        true,
        Duration::from_secs(600),
    );
    service.fetch_weather_data(46.2, 4.8).await.unwrap();
    service.clear_cache().await;
    service.fetch_weather_data(46.2, 4.8).await.unwrap();
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_disabled_service_does_not_call_provider() {
    let provider = fixture();
    let service = WeatherService::new(
        Arc::clone(&provider) as Arc<dyn WeatherProvider>,
        false,
        Duration::from_secs(600),
    );
    let error = service.fetch_weather_data(46.2, 4.8).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_invalid_coordinates_are_rejected_first() {
    let provider = fixture();
    let service = WeatherService::new(
        Arc::clone(&provider) as Arc<dyn WeatherProvider>,
        true,
        Duration::from_secs(600),
    );
    let error = service.fetch_weather_data(95.0, 4.8).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_maps_to_unavailable() {
    let service = WeatherService::new(
        Arc::new(FailingWeatherProvider),
        true,
        Duration::from_secs(600),
    );
    let error = service.fetch_weather_data(46.2, 4.8).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert_eq!(service.cached_locations().await, 0);
}

#[tokio::test]
async fn test_short_payload_maps_to_service_error() {
    let provider = Arc::new(FixtureWeatherProvider::new(common::raw_forecast(6, 8.0, 10.0)));
    let service = WeatherService::new(provider, true, Duration::from_secs(600));
    let error = service.fetch_weather_data(46.2, 4.8).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_unreachable_open_meteo_is_unavailable() {
    let provider = OpenMeteoProvider::new("http://127.0.0.1:9/v1", Duration::from_secs(2));
    let service = WeatherService::new(Arc::new(provider), true, Duration::from_secs(600));
    let error = service.fetch_weather_data(46.2, 4.8).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
}
