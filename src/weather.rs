// ABOUTME: Weather service fetching forecasts, deriving hunting snapshots and caching them by location
// ABOUTME: Wraps a WeatherProvider with coordinate validation, a TTL cache and an enable switch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Weather service
//!
//! Fetching goes through a [`WeatherProvider`] so tests can inject fixtures.
//! Derived snapshots are cached per location, keyed by coordinates rounded
//! to two decimals (about one kilometre). The cache holds a bounded number
//! of locations and evicts the least recently used one when full.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use bionic_core::constants::weather::{CACHE_COORDINATE_PRECISION, MAX_CACHED_LOCATIONS};
use bionic_core::errors::{AppError, AppResult, ProviderError};
use bionic_core::models::WeatherSnapshot;
use bionic_intelligence::build_weather_snapshot;
use bionic_providers::{OpenMeteoProvider, WeatherProvider};

use crate::config::WeatherServiceConfig;

/// Cache key: coordinates scaled by 10^precision and rounded
type CacheKey = (i64, i64);

#[derive(Debug, Clone)]
struct CachedSnapshot {
    snapshot: WeatherSnapshot,
    cached_at: Instant,
}

/// Forecast fetching with per-location caching
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    enabled: bool,
    ttl: Duration,
    cache: Mutex<LruCache<CacheKey, CachedSnapshot>>,
}

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(MAX_CACHED_LOCATIONS) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService")
            .field("provider", &self.provider.name())
            .field("enabled", &self.enabled)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn cache_key(latitude: f64, longitude: f64) -> CacheKey {
    let scale = 10_f64.powi(CACHE_COORDINATE_PRECISION);
    (
        (latitude * scale).round() as i64,
        (longitude * scale).round() as i64,
    )
}

/// Reject coordinates outside the WGS84 ranges
///
/// # Errors
///
/// Returns `ValueOutOfRange` for out-of-range or non-finite coordinates
pub fn validate_coordinates(latitude: f64, longitude: f64) -> AppResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::out_of_range("latitude", latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::out_of_range("longitude", longitude));
    }
    Ok(())
}

impl WeatherService {
    /// Service over an arbitrary provider
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>, enabled: bool, ttl: Duration) -> Self {
        Self::with_capacity(provider, enabled, ttl, DEFAULT_CAPACITY)
    }

    /// Service caching at most `capacity` locations
    #[must_use]
    pub fn with_capacity(
        provider: Arc<dyn WeatherProvider>,
        enabled: bool,
        ttl: Duration,
        capacity: NonZeroUsize,
    ) -> Self {
        Self {
            provider,
            enabled,
            ttl,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    async fn cached(&self, key: &CacheKey) -> Option<WeatherSnapshot> {
        let mut cache = self.cache.lock().await;
        let entry = cache.get(key)?;
        if entry.cached_at.elapsed() < self.ttl {
            return Some(entry.snapshot.clone());
        }
        cache.pop(key);
        None
    }

    /// Open-Meteo backed service from environment settings
    #[must_use]
    pub fn from_config(config: &WeatherServiceConfig) -> Self {
        let provider = OpenMeteoProvider::new(&config.base_url, config.timeout);
        Self::new(Arc::new(provider), config.enabled, config.cache_ttl)
    }

    /// Whether fetching is switched on
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Weather snapshot for a location, served from cache when fresh
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for invalid coordinates and an external
    /// service error when the provider is disabled, unreachable or returns
    /// an unusable payload.
    pub async fn fetch_weather_data(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<WeatherSnapshot> {
        validate_coordinates(latitude, longitude)?;
        if !self.enabled {
            return Err(ProviderError::Disabled(self.provider.name().to_owned()).into());
        }

        let key = cache_key(latitude, longitude);
        if let Some(snapshot) = self.cached(&key).await {
            debug!(latitude, longitude, "Weather cache hit");
            return Ok(snapshot);
        }

        let raw = self
            .provider
            .fetch_forecast(latitude, longitude)
            .await
            .inspect_err(|e| {
                warn!(
                    provider = self.provider.name(),
                    latitude,
                    longitude,
                    error = %e,
                    "Weather fetch failed"
                );
            })?;
        let snapshot = build_weather_snapshot(&raw)?;

        info!(
            provider = self.provider.name(),
            latitude,
            longitude,
            hunting_score = snapshot.hunting_conditions.score,
            thermal_state = ?snapshot.thermal_state,
            "Weather snapshot refreshed"
        );
        self.cache.lock().await.put(
            key,
            CachedSnapshot {
                snapshot: snapshot.clone(),
                cached_at: Instant::now(),
            },
        );
        Ok(snapshot)
    }

    /// Drop every cached snapshot
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Number of cached locations
    pub async fn cached_locations(&self) -> usize {
        self.cache.lock().await.len()
    }
}
