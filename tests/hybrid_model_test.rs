// ABOUTME: Integration tests for the hybrid scoring model
// ABOUTME: Covers disabled, unavailable and adjusted AI paths plus live configuration updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use bionic_core::models::{AiStatus, RatingLevel};
use bionic_hunt::hybrid::HybridModel;
use bionic_intelligence::{ScoringConfigUpdate, Thresholds};
use bionic_providers::{
    AdjustmentClientConfig, AdjustmentOutcome, AdjustmentProvider, AiAdjustment,
    HttpAdjustmentClient,
};

use common::StubAdjuster;

fn adjusted(adjusted_score: Option<f64>, adjustment: f64) -> AdjustmentOutcome {
    AdjustmentOutcome::Adjusted(AiAdjustment {
        adjusted_score,
        adjustment,
        recommendations: vec!["Hunt the downwind edge".to_owned()],
        confidence: 0.7,
        reasoning: Some("Mast crop and cold morning".to_owned()),
    })
}

#[tokio::test]
async fn test_ai_disabled_keeps_rules_score() {
    common::init_test_logging();
    let stub = Arc::new(StubAdjuster::new(adjusted(Some(99.0), 10.0)));
    let model = HybridModel::new(
        common::memory_store(),
        Some(Arc::clone(&stub) as Arc<dyn AdjustmentProvider>),
    );

    let result = model
        .calculate_hybrid_score(&common::rich_features(), None, false, common::local_time(7))
        .await
        .unwrap();

    assert_eq!(stub.calls(), 0);
    assert_eq!(result.ai_status, AiStatus::Disabled);
    assert!((result.score_final - result.score_after_rules).abs() < f64::EPSILON);
    assert!(result.ai_adjustment.abs() < f64::EPSILON);
    assert!(result.ai_confidence.abs() < f64::EPSILON);
    assert!(result.ai_recommendations.is_empty());
    assert!(result.ai_reasoning.is_none());
}

#[tokio::test]
async fn test_no_adjuster_means_disabled() {
    let model = HybridModel::new(common::memory_store(), None);
    let result = model
        .calculate_hybrid_score(&common::minimal_features(), None, true, common::local_time(7))
        .await
        .unwrap();
    assert_eq!(result.ai_status, AiStatus::Disabled);
    assert!((result.score_final - result.score_after_rules).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_unavailable_adjuster_falls_back() {
    let stub = Arc::new(StubAdjuster::new(AdjustmentOutcome::Unavailable {
        reason: "timeout".to_owned(),
    }));
    let model = HybridModel::new(
        common::memory_store(),
        Some(Arc::clone(&stub) as Arc<dyn AdjustmentProvider>),
    );

    let result = model
        .calculate_hybrid_score(&common::rich_features(), None, true, common::local_time(7))
        .await
        .unwrap();

    assert_eq!(stub.calls(), 1);
    assert_eq!(result.ai_status, AiStatus::Unavailable);
    assert!((result.score_final - result.score_after_rules).abs() < f64::EPSILON);
    assert!(result.ai_adjustment.abs() < f64::EPSILON);
    assert!(result.ai_confidence.abs() < f64::EPSILON);
    assert!(result.ai_recommendations.is_empty());
}

#[tokio::test]
async fn test_unreachable_service_falls_back() {
    let mut config = AdjustmentClientConfig::new("http://127.0.0.1:9/adjust");
    config.timeout = Duration::from_secs(2);
    let client: Arc<dyn AdjustmentProvider> = Arc::new(HttpAdjustmentClient::new(config));
    let model = HybridModel::new(common::memory_store(), Some(client));

    let result = model
        .calculate_hybrid_score(&common::rich_features(), None, true, common::local_time(7))
        .await
        .unwrap();

    assert_eq!(result.ai_status, AiStatus::Unavailable);
    assert!((result.score_final - result.score_after_rules).abs() < f64::EPSILON);
    assert!(result.ai_adjustment.abs() < f64::EPSILON);
    assert!(result.ai_confidence.abs() < f64::EPSILON);
    assert!(result.ai_recommendations.is_empty());
}

#[tokio::test]
async fn test_adjusted_score_is_clamped() {
    let stub: Arc<dyn AdjustmentProvider> = Arc::new(StubAdjuster::new(adjusted(Some(140.0), 40.0)));
    let model = HybridModel::new(common::memory_store(), Some(stub));

    let result = model
        .calculate_hybrid_score(&common::rich_features(), None, true, common::local_time(7))
        .await
        .unwrap();

    assert_eq!(result.ai_status, AiStatus::Adjusted);
    assert!((result.score_final - 100.0).abs() < f64::EPSILON);
    assert_eq!(result.rating.level, RatingLevel::Excellent);
    assert_eq!(result.ai_recommendations.len(), 1);
    assert!((result.ai_confidence - 0.7).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_relative_adjustment_applies_to_rules_score() {
    let stub: Arc<dyn AdjustmentProvider> = Arc::new(StubAdjuster::new(adjusted(None, -5.0)));
    let model = HybridModel::new(common::memory_store(), Some(stub));

    let result = model
        .calculate_hybrid_score(&common::minimal_features(), None, true, common::local_time(7))
        .await
        .unwrap();

    let expected = ((result.score_after_rules - 5.0).clamp(0.0, 100.0) * 10.0).round() / 10.0;
    assert!((result.score_final - expected).abs() < 1e-9);
    assert!((result.ai_adjustment + 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_threshold_update_changes_rating() {
    let store = common::memory_store();
    let model = HybridModel::new(Arc::clone(&store), None);
    let features = common::minimal_features();

    let before = model
        .calculate_hybrid_score(&features, None, false, common::local_time(7))
        .await
        .unwrap();
    assert_ne!(before.rating.level, RatingLevel::Excellent);

    store
        .update(ScoringConfigUpdate {
            thresholds: Some(Thresholds {
                excellent: 1.0,
                good: 0.75,
                moderate: 0.5,
                low: 0.25,
            }),
            ..ScoringConfigUpdate::default()
        })
        .await
        .unwrap();

    let after = model
        .calculate_hybrid_score(&features, None, false, common::local_time(7))
        .await
        .unwrap();
    assert_eq!(after.rating.level, RatingLevel::Excellent);
    assert!((after.score_final - before.score_final).abs() < f64::EPSILON);
}
