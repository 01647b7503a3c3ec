// ABOUTME: Waypoint analysis pipeline tying normalization, weather, hybrid scoring and strategy together
// ABOUTME: Runs each analysis in a tracing span with a unique id and degrades gracefully without weather
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Waypoint analysis orchestration

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use bionic_core::errors::AppResult;
use bionic_core::models::{
    HybridResult, StrategyResult, TerritoryContext, WaypointFeatures, WeatherSnapshot,
};
use bionic_intelligence::get_strategy_for_waypoint;

use crate::adapter::{DataAdapter, RawWaypointInput};
use crate::hybrid::HybridModel;
use crate::weather::WeatherService;

const fn default_true() -> bool {
    true
}

/// One waypoint to analyze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Raw collaborator data
    pub waypoint: RawWaypointInput,
    /// Territory-level overrides
    #[serde(default)]
    pub territory: TerritoryContext,
    /// Ask the adjustment service
    #[serde(default = "default_true")]
    pub use_ai: bool,
    /// Fetch a weather snapshot
    #[serde(default = "default_true")]
    pub use_weather: bool,
    /// Reference time, host local now when absent; shifted to the
    /// waypoint's offset when weather is available
    #[serde(default)]
    pub at: Option<DateTime<FixedOffset>>,
}

impl AnalysisRequest {
    /// Request with AI and weather enabled at the current time
    #[must_use]
    pub fn new(waypoint: RawWaypointInput) -> Self {
        Self {
            waypoint,
            territory: TerritoryContext::default(),
            use_ai: true,
            use_weather: true,
            at: None,
        }
    }
}

/// Everything computed for one waypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Correlation id, also present in logs
    pub analysis_id: Uuid,
    /// Reference time used for time-dependent parts, in waypoint local time
    /// when weather was available
    pub analyzed_at: DateTime<FixedOffset>,
    /// Normalized features
    pub waypoint: WaypointFeatures,
    /// Weather snapshot, absent when disabled or unavailable
    pub weather: Option<WeatherSnapshot>,
    /// Scores, rules and adjustment
    pub hybrid: HybridResult,
    /// Tactical strategy
    pub strategy: StrategyResult,
}

/// Express `at` in the waypoint's offset when a forecast provides it
///
/// Hour buckets (dawn, dusk, exit time) are read from the local clock of the
/// waypoint, not of the host running the analysis.
#[must_use]
pub fn waypoint_local_time(
    at: DateTime<FixedOffset>,
    weather: Option<&WeatherSnapshot>,
) -> DateTime<FixedOffset> {
    weather.map_or(at, |snapshot| {
        at.with_timezone(&snapshot.current_time.timezone())
    })
}

/// Runs the full analysis pipeline
#[derive(Debug)]
pub struct WaypointAnalysisService {
    adapter: DataAdapter,
    weather: Option<Arc<WeatherService>>,
    hybrid: Arc<HybridModel>,
}

impl WaypointAnalysisService {
    /// Service over shared components; `weather` may be absent
    #[must_use]
    pub const fn new(
        adapter: DataAdapter,
        weather: Option<Arc<WeatherService>>,
        hybrid: Arc<HybridModel>,
    ) -> Self {
        Self {
            adapter,
            weather,
            hybrid,
        }
    }

    async fn weather_for(&self, features: &WaypointFeatures) -> Option<WeatherSnapshot> {
        let service = self.weather.as_ref()?;
        match service
            .fetch_weather_data(features.latitude, features.longitude)
            .await
        {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "Weather unavailable, continuing without it");
                None
            }
        }
    }

    /// Analyze one waypoint
    ///
    /// A weather failure never fails the analysis; the strategy then skips
    /// its weather-dependent parts.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the raw input cannot be normalized
    pub async fn analyze(&self, request: AnalysisRequest) -> AppResult<AnalysisReport> {
        let analysis_id = Uuid::new_v4();
        let span = info_span!("waypoint_analysis", %analysis_id);
        self.run(analysis_id, request).instrument(span).await
    }

    async fn run(&self, analysis_id: Uuid, request: AnalysisRequest) -> AppResult<AnalysisReport> {
        let waypoint = self.adapter.normalize(&request.waypoint)?;
        let weather = if request.use_weather {
            self.weather_for(&waypoint).await
        } else {
            None
        };
        let analyzed_at = waypoint_local_time(
            request.at.unwrap_or_else(|| Local::now().fixed_offset()),
            weather.as_ref(),
        );

        let hybrid = self
            .hybrid
            .calculate_hybrid_score(&waypoint, weather.as_ref(), request.use_ai, analyzed_at)
            .await?;
        let strategy = get_strategy_for_waypoint(
            &waypoint,
            &hybrid,
            weather.as_ref(),
            &request.territory,
            analyzed_at,
        );

        info!(
            latitude = waypoint.latitude,
            longitude = waypoint.longitude,
            score_final = hybrid.score_final,
            weather_available = strategy.weather_available,
            "Waypoint analyzed"
        );
        Ok(AnalysisReport {
            analysis_id,
            analyzed_at,
            waypoint,
            weather,
            hybrid,
            strategy,
        })
    }
}
