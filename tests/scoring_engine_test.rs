// ABOUTME: Integration tests for the deterministic scoring engine
// ABOUTME: Covers score ranges, weights, purity and territory scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use bionic_core::models::{ScoreCategory, StandType};
use bionic_intelligence::{
    calculate_bionic_score, get_scores_for_waypoint, score_territory, CategoryWeights,
    ScoringConfig,
};

#[test]
fn test_default_weights_sum_to_one() {
    let weights = CategoryWeights::default();
    assert!((weights.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn test_scores_stay_in_range_for_minimal_and_rich_inputs() {
    common::init_test_logging();
    let config = ScoringConfig::default();
    for features in [common::minimal_features(), common::rich_features()] {
        let scores = get_scores_for_waypoint(&features, &config).unwrap();
        for category in ScoreCategory::ALL {
            let value = scores.get(category);
            assert!((0.0..=100.0).contains(&value), "{category} out of range: {value}");
        }
        assert!((0.0..=100.0).contains(&scores.composite));
    }
}

#[test]
fn test_scores_stay_in_range_for_extreme_inputs() {
    let config = ScoringConfig::default();
    let mut features = common::minimal_features();
    features.slope = 90.0;
    features.water_distance = 1.0e7;
    features.ndvi = -1.0;
    features.relative_elevation = Some(-500.0);
    features.human_pressure = Some(100.0);
    features.visibility = Some(0.0);
    let scores = get_scores_for_waypoint(&features, &config).unwrap();
    for category in ScoreCategory::ALL {
        assert!((0.0..=100.0).contains(&scores.get(category)));
    }
}

#[test]
fn test_scoring_is_pure() {
    let config = ScoringConfig::default();
    let features = common::rich_features();
    let first = get_scores_for_waypoint(&features, &config).unwrap();
    let second = get_scores_for_waypoint(&features, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rich_waypoint_outscores_minimal_one() {
    let config = ScoringConfig::default();
    let rich = get_scores_for_waypoint(&common::rich_features(), &config).unwrap();
    let minimal = get_scores_for_waypoint(&common::minimal_features(), &config).unwrap();
    assert!(rich.composite > minimal.composite);
}

#[test]
fn test_composite_is_weighted_sum_of_sub_scores() {
    let config = ScoringConfig::default();
    let scores = get_scores_for_waypoint(&common::rich_features(), &config).unwrap();
    let expected = calculate_bionic_score(&scores, &config.category_weights);
    assert!((scores.composite - (expected * 10.0).round() / 10.0).abs() < 1e-9);
}

#[test]
fn test_invalid_features_are_rejected() {
    let config = ScoringConfig::default();
    let mut features = common::minimal_features();
    features.latitude = 120.0;
    assert!(get_scores_for_waypoint(&features, &config).is_err());

    let mut features = common::minimal_features();
    features.ndvi = f64::NAN;
    assert!(get_scores_for_waypoint(&features, &config).is_err());
}

#[test]
fn test_territory_scoring_preserves_order() {
    let config = ScoringConfig::default();
    let mut invalid = common::minimal_features();
    invalid.slope = -3.0;
    let mut conifer = common::minimal_features();
    conifer.stand_type = StandType::Conifer;

    let waypoints = vec![common::rich_features(), invalid, conifer.clone()];
    let results = score_territory(&waypoints, &config);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert_eq!(
        results[2].as_ref().unwrap(),
        &get_scores_for_waypoint(&conifer, &config).unwrap()
    );
}
