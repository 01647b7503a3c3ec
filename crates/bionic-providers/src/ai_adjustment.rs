// ABOUTME: Client for the optional AI score-adjustment service (level 2 of the hybrid model)
// ABOUTME: Builds the outbound payload, enforces timeout, retries and circuit breaking, never fails hard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # AI Adjustment
//!
//! One `POST` per waypoint with the rule-adjusted scores, a subset of the
//! waypoint features, a subset of the weather and calendar context. The
//! service answers with an adjusted score and free-text recommendations.
//!
//! Any failure is reported as [`AdjustmentOutcome::Unavailable`] so scoring
//! always completes with the rules-only score.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use bionic_core::constants::ai::{
    DEFAULT_FAILURE_THRESHOLD, DEFAULT_MAX_RETRIES, DEFAULT_RECOVERY_SECS, DEFAULT_TIMEOUT_SECS,
    RETRY_BACKOFF_MS,
};
use bionic_core::constants::providers::AI_ADJUSTMENT;
use bionic_core::errors::provider::ProviderError;
use bionic_core::models::{
    FrontType, RulesOutcome, Season, StandType, SubScores, ThermalState, WaypointFeatures,
    WeatherSnapshot,
};

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::http_client::client_with_timeout;

// ============================================================================
// Payload
// ============================================================================

/// Rule-adjusted scores sent to the service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentScores {
    /// Habitat sub-score
    pub habitat: f64,
    /// Rut sub-score
    pub rut: f64,
    /// Salines sub-score
    pub salines: f64,
    /// Affuts sub-score
    pub affuts: f64,
    /// Trajets sub-score
    pub trajets: f64,
    /// Peuplements sub-score
    pub peuplements: f64,
    /// Weighted composite before rules
    pub composite: f64,
    /// Composite after rules
    pub score: f64,
    /// Sum of rule deltas
    pub rules_adjustment: i32,
    /// Names of the rules that fired
    pub applied_rules: Vec<String>,
}

impl AdjustmentScores {
    /// Merge base sub-scores with the rules outcome
    #[must_use]
    pub fn new(scores: &SubScores, rules: &RulesOutcome) -> Self {
        Self {
            habitat: scores.habitat,
            rut: scores.rut,
            salines: scores.salines,
            affuts: scores.affuts,
            trajets: scores.trajets,
            peuplements: scores.peuplements,
            composite: scores.composite,
            score: rules.score,
            rules_adjustment: rules.rules_adjustment,
            applied_rules: rules.applied_rules.iter().map(|r| r.name.clone()).collect(),
        }
    }
}

/// Waypoint fields the service reasons about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointSummary {
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// Elevation (m)
    pub elevation: f64,
    /// Slope (degrees)
    pub slope: f64,
    /// Aspect (degrees)
    pub aspect: Option<f64>,
    /// Distance to water (m)
    pub water_distance: f64,
    /// Vegetation index
    pub ndvi: f64,
    /// Main stand
    pub stand_type: StandType,
    /// Stand edge flag
    pub is_transition: bool,
    /// Human pressure (0-100)
    pub human_pressure: Option<f64>,
    /// Free-text context
    pub context: Option<String>,
}

impl From<&WaypointFeatures> for WaypointSummary {
    fn from(features: &WaypointFeatures) -> Self {
        Self {
            latitude: features.latitude,
            longitude: features.longitude,
            elevation: features.elevation,
            slope: features.slope,
            aspect: features.aspect,
            water_distance: features.water_distance,
            ndvi: features.ndvi,
            stand_type: features.stand_type,
            is_transition: features.is_transition,
            human_pressure: features.human_pressure,
            context: features.context.clone(),
        }
    }
}

/// Weather fields the service reasons about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Wind speed (km/h)
    pub wind_speed: f64,
    /// Wind bearing (degrees)
    pub wind_direction: f64,
    /// Precipitation (mm)
    pub precipitation: f64,
    /// Cloud cover (%)
    pub cloud_cover: f64,
    /// Sea-level pressure (hPa)
    pub pressure: Option<f64>,
    /// Thermal flow
    pub thermal_state: ThermalState,
    /// Incoming front
    pub front_type: FrontType,
    /// Hunting-conditions score
    pub hunting_score: f64,
}

impl From<&WeatherSnapshot> for WeatherSummary {
    fn from(weather: &WeatherSnapshot) -> Self {
        Self {
            temperature: weather.current.temperature,
            wind_speed: weather.current.wind_speed,
            wind_direction: weather.current.wind_direction,
            precipitation: weather.current.precipitation,
            cloud_cover: weather.current.cloud_cover,
            pressure: weather.current.pressure,
            thermal_state: weather.thermal_state,
            front_type: weather.front_type,
            hunting_score: weather.hunting_conditions.score,
        }
    }
}

/// Calendar context of the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentContext {
    /// Season
    pub season: Season,
    /// Part of the day
    pub time_of_day: String,
    /// Moon phase
    pub moon_phase: String,
}

/// Body of the adjustment request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentRequest {
    /// Rule-adjusted scores
    pub scores: AdjustmentScores,
    /// Waypoint subset
    pub waypoint_data: WaypointSummary,
    /// Weather subset, `null` when unavailable
    pub weather: Option<WeatherSummary>,
    /// Calendar context
    pub context: AdjustmentContext,
}

/// Body of a successful adjustment response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiAdjustment {
    /// Final score proposed by the service
    #[serde(default)]
    pub adjusted_score: Option<f64>,
    /// Points added over the rules score
    #[serde(default)]
    pub adjustment: f64,
    /// Free-text advice
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Confidence in [0,1]
    #[serde(default)]
    pub confidence: f64,
    /// Explanation of the adjustment
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl AiAdjustment {
    /// Reject non-finite numbers and clamp confidence to [0,1]
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` when a numeric field is NaN or infinite.
    pub fn validated(mut self) -> Result<Self, ProviderError> {
        let finite = self
            .adjusted_score
            .into_iter()
            .chain([self.adjustment, self.confidence])
            .all(f64::is_finite);
        if !finite {
            return Err(ProviderError::InvalidData {
                provider: AI_ADJUSTMENT.to_owned(),
                message: "non-finite number in adjustment".to_owned(),
            });
        }
        self.confidence = self.confidence.clamp(0.0, 1.0);
        Ok(self)
    }
}

/// Result of asking for an adjustment
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentOutcome {
    /// The service answered with a usable adjustment
    Adjusted(AiAdjustment),
    /// The service could not be used; scoring continues without it
    Unavailable {
        /// Why the adjustment is missing
        reason: String,
    },
}

/// Source of level-2 score adjustments
#[async_trait]
pub trait AdjustmentProvider: Send + Sync {
    /// Provider identifier used in logs
    fn name(&self) -> &'static str;

    /// Ask for an adjustment; never fails, degrades to `Unavailable`
    async fn request_adjustment(&self, request: &AdjustmentRequest) -> AdjustmentOutcome;
}

// ============================================================================
// HTTP client
// ============================================================================

/// Settings of the HTTP adjustment client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentClientConfig {
    /// Endpoint receiving the `POST`
    pub endpoint: String,
    /// Optional bearer token
    pub api_key: Option<String>,
    /// Per-attempt deadline
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Consecutive failures before the circuit opens
    pub failure_threshold: u32,
    /// Cool-down of an open circuit
    pub recovery_timeout: Duration,
}

impl AdjustmentClientConfig {
    /// Defaults for an endpoint
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            recovery_timeout: Duration::from_secs(DEFAULT_RECOVERY_SECS),
        }
    }
}

/// `POST`s adjustment requests to a JSON endpoint
#[derive(Debug)]
pub struct HttpAdjustmentClient {
    client: Client,
    config: AdjustmentClientConfig,
    breaker: CircuitBreaker,
}

impl HttpAdjustmentClient {
    /// Client for the configured endpoint
    #[must_use]
    pub fn new(config: AdjustmentClientConfig) -> Self {
        let breaker = CircuitBreaker::with_config(
            AI_ADJUSTMENT,
            CircuitBreakerConfig::new(config.failure_threshold, config.recovery_timeout),
        );
        Self {
            client: client_with_timeout(config.timeout),
            config,
            breaker,
        }
    }

    /// Breaker guarding the endpoint
    #[must_use]
    pub const fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    fn transport_error(&self, error: &reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout {
                provider: AI_ADJUSTMENT.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            ProviderError::NetworkError(format!("{AI_ADJUSTMENT}: {error}"))
        }
    }

    async fn send_once(&self, request: &AdjustmentRequest) -> Result<AiAdjustment, ProviderError> {
        let mut builder = self.client.post(&self.config.endpoint).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(&e))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(ProviderError::ApiError {
                provider: AI_ADJUSTMENT.to_owned(),
                status_code: status.as_u16(),
                message,
                retryable: ProviderError::is_retryable_status(status.as_u16()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;
        let adjustment: AiAdjustment =
            serde_json::from_str(&body).map_err(|source| ProviderError::ParseError {
                provider: AI_ADJUSTMENT.to_owned(),
                field: "adjustment",
                source,
            })?;
        adjustment.validated()
    }

    /// Call the endpoint with retries and circuit breaking
    ///
    /// Retryable failures are retried up to `max_retries` times with a
    /// linearly growing pause.
    ///
    /// # Errors
    ///
    /// Returns the last `ProviderError` once attempts are exhausted or a
    /// non-retryable error occurs.
    pub async fn adjust(&self, request: &AdjustmentRequest) -> Result<AiAdjustment, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.breaker.call(self.send_once(request)).await {
                Ok(adjustment) => return Ok(adjustment),
                Err(error) if error.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    debug!(attempt, error = %error, "Retrying adjustment request");
                    sleep(Duration::from_millis(
                        RETRY_BACKOFF_MS * u64::from(attempt),
                    ))
                    .await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[async_trait]
impl AdjustmentProvider for HttpAdjustmentClient {
    fn name(&self) -> &'static str {
        AI_ADJUSTMENT
    }

    async fn request_adjustment(&self, request: &AdjustmentRequest) -> AdjustmentOutcome {
        match self.adjust(request).await {
            Ok(adjustment) => AdjustmentOutcome::Adjusted(adjustment),
            Err(error) => {
                warn!(
                    service = AI_ADJUSTMENT,
                    retryable = error.is_retryable(),
                    error = %error,
                    "AI adjustment unavailable, keeping rules score"
                );
                AdjustmentOutcome::Unavailable {
                    reason: error.to_string(),
                }
            }
        }
    }
}
