// ABOUTME: Hybrid scoring model chaining deterministic scores, expert rules and an optional AI adjustment
// ABOUTME: Falls back to the rules-only score whenever the adjustment service is disabled or unavailable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Hybrid Model
//!
//! Three levels produce the final score of a waypoint:
//!
//! 1. the deterministic scoring engine (six sub-scores and a composite)
//! 2. the expert rules engine (bounded additive corrections)
//! 3. an optional remote adjustment, never required for a result
//!
//! The configuration is snapshotted once per call so a concurrent update
//! never mixes two configurations in one result.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info};

use bionic_core::errors::AppResult;
use bionic_core::models::{
    AiStatus, HybridResult, RulesOutcome, SubScores, WaypointFeatures, WeatherSnapshot,
};
use bionic_intelligence::calendar::{moon_phase_for, season_for, time_of_day_for};
use bionic_intelligence::rating::rate;
use bionic_intelligence::scoring::elementary::{clamp_score, round1};
use bionic_intelligence::{get_scores_for_waypoint, RulesEngine};
use bionic_providers::ai_adjustment::{
    AdjustmentContext, AdjustmentScores, WaypointSummary, WeatherSummary,
};
use bionic_providers::{AdjustmentOutcome, AdjustmentProvider, AdjustmentRequest, AiAdjustment};

use crate::config::ConfigStore;

/// Level-2 fields of a hybrid result
struct AiFields {
    final_score: f64,
    adjustment: f64,
    recommendations: Vec<String>,
    confidence: f64,
    reasoning: Option<String>,
    status: AiStatus,
}

impl AiFields {
    const fn rules_only(score: f64, status: AiStatus) -> Self {
        Self {
            final_score: score,
            adjustment: 0.0,
            recommendations: Vec::new(),
            confidence: 0.0,
            reasoning: None,
            status,
        }
    }

    fn adjusted(rules_score: f64, ai: AiAdjustment) -> Self {
        let final_score = ai
            .adjusted_score
            .unwrap_or(rules_score + ai.adjustment);
        Self {
            final_score,
            adjustment: ai.adjustment,
            recommendations: ai.recommendations,
            confidence: ai.confidence,
            reasoning: ai.reasoning,
            status: AiStatus::Adjusted,
        }
    }
}

/// Scoring, rules and optional adjustment behind one call
pub struct HybridModel {
    config: Arc<ConfigStore>,
    rules: RulesEngine,
    adjuster: Option<Arc<dyn AdjustmentProvider>>,
}

impl fmt::Debug for HybridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridModel")
            .field("rules", &self.rules.list_rules().len())
            .field("adjuster", &self.adjuster.as_ref().map(|a| a.name()))
            .finish_non_exhaustive()
    }
}

impl HybridModel {
    /// Model reading its configuration from `config`
    #[must_use]
    pub fn new(config: Arc<ConfigStore>, adjuster: Option<Arc<dyn AdjustmentProvider>>) -> Self {
        Self {
            config,
            rules: RulesEngine::new(),
            adjuster,
        }
    }

    fn adjustment_request(
        features: &WaypointFeatures,
        weather: Option<&WeatherSnapshot>,
        rules: &RulesOutcome,
        scores: &SubScores,
        at: DateTime<FixedOffset>,
    ) -> AdjustmentRequest {
        AdjustmentRequest {
            scores: AdjustmentScores::new(scores, rules),
            waypoint_data: WaypointSummary::from(features),
            weather: weather.map(WeatherSummary::from),
            context: AdjustmentContext {
                season: features.season.unwrap_or_else(|| season_for(&at)),
                time_of_day: time_of_day_for(&at).as_str().to_owned(),
                moon_phase: moon_phase_for(&at.with_timezone(&Utc)).as_str().to_owned(),
            },
        }
    }

    /// Final hybrid score of a waypoint
    ///
    /// With `use_ai` false or no adjustment service, the final score is the
    /// rules score and every AI field is zeroed. An unavailable service
    /// degrades the same way.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the features are malformed
    pub async fn calculate_hybrid_score(
        &self,
        features: &WaypointFeatures,
        weather: Option<&WeatherSnapshot>,
        use_ai: bool,
        at: DateTime<FixedOffset>,
    ) -> AppResult<HybridResult> {
        let config = self.config.get();
        let scores = get_scores_for_waypoint(features, &config)?;
        let rules = self.rules.apply(&scores, features);

        let ai = match (&self.adjuster, use_ai) {
            (Some(adjuster), true) => {
                let request = Self::adjustment_request(features, weather, &rules, &scores, at);
                match adjuster.request_adjustment(&request).await {
                    AdjustmentOutcome::Adjusted(adjustment) => {
                        AiFields::adjusted(rules.score, adjustment)
                    }
                    AdjustmentOutcome::Unavailable { reason } => {
                        debug!(provider = adjuster.name(), %reason, "Using rules-only score");
                        AiFields::rules_only(rules.score, AiStatus::Unavailable)
                    }
                }
            }
            _ => AiFields::rules_only(rules.score, AiStatus::Disabled),
        };

        let score_final = round1(clamp_score(ai.final_score));
        let rating = rate(score_final, &config.thresholds);
        info!(
            composite = scores.composite,
            score_after_rules = rules.score,
            rules_adjustment = rules.rules_adjustment,
            score_final,
            ai_status = ?ai.status,
            rating = rating.level.as_str(),
            "Hybrid score computed"
        );

        Ok(HybridResult {
            scores,
            score_after_rules: rules.score,
            applied_rules: rules.applied_rules,
            rules_adjustment: rules.rules_adjustment,
            skipped_rules: rules.skipped_rules,
            score_final,
            ai_adjustment: ai.adjustment,
            ai_recommendations: ai.recommendations,
            ai_confidence: ai.confidence,
            ai_reasoning: ai.reasoning,
            ai_status: ai.status,
            rating,
        })
    }
}
