// ABOUTME: Integration tests for the expert rules engine
// ABOUTME: Covers clamping, synergy conditions and not-applicable reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use bionic_core::models::{SubScores, WaypointFeatures};
use bionic_intelligence::rules_engine::{RuleCheck, RuleDefinition};
use bionic_intelligence::{apply_rules_engine, RulesEngine};

fn scores(habitat: f64, rut: f64, composite: f64) -> SubScores {
    SubScores {
        habitat,
        rut,
        salines: 40.0,
        affuts: 40.0,
        trajets: 40.0,
        peuplements: 40.0,
        composite,
    }
}

fn always(_: &SubScores, _: &WaypointFeatures) -> RuleCheck {
    RuleCheck::Triggered
}

#[test]
fn test_bonus_clamps_at_one_hundred() {
    let engine = RulesEngine::with_rules(vec![RuleDefinition {
        name: "BIG_BONUS",
        description: "Always adds 30",
        delta: 30,
        condition: always,
    }]);
    let outcome = engine.apply(&scores(50.0, 50.0, 95.0), &common::minimal_features());
    assert_eq!(outcome.rules_adjustment, 30);
    assert!((outcome.score - 100.0).abs() < f64::EPSILON);
    assert_eq!(outcome.applied_rules.len(), 1);
}

#[test]
fn test_habitat_rut_synergy_needs_both_scores() {
    let features = common::minimal_features();
    let synergy = |h, r| {
        apply_rules_engine(&scores(h, r, 60.0), &features)
            .applied_rules
            .iter()
            .any(|rule| rule.name == "HABITAT_RUT_SYNERGY")
    };
    assert!(synergy(70.0, 70.0));
    assert!(!synergy(90.0, 69.9));
    assert!(!synergy(69.9, 90.0));
}

#[test]
fn test_rich_waypoint_triggers_bonuses() {
    let features = common::rich_features();
    let outcome = apply_rules_engine(&scores(50.0, 50.0, 60.0), &features);
    let names: Vec<_> = outcome.applied_rules.iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"WATER_CORRIDOR_SYNERGY"));
    assert!(names.contains(&"FEEDING_RESTING_PROXIMITY"));
    assert!(names.contains(&"TRANSITION_EDGE"));
    assert!(outcome.skipped_rules.is_empty());
    assert_eq!(
        outcome.rules_adjustment,
        outcome.applied_rules.iter().map(|r| r.delta).sum::<i32>()
    );
}

#[test]
fn test_missing_inputs_are_reported_not_penalized() {
    let outcome = apply_rules_engine(&scores(50.0, 50.0, 55.0), &common::minimal_features());
    let skipped: Vec<_> = outcome.skipped_rules.iter().map(|r| r.name.as_str()).collect();
    assert!(skipped.contains(&"WATER_CORRIDOR_SYNERGY"));
    assert!(skipped.contains(&"HIGH_HUMAN_PRESSURE"));
    assert_eq!(outcome.rules_adjustment, 0);
    assert!((outcome.score - 55.0).abs() < 1e-9);
}

#[test]
fn test_human_pressure_bands_are_exclusive() {
    let mut features = common::minimal_features();
    features.human_pressure = Some(80.0);
    let outcome = apply_rules_engine(&scores(50.0, 50.0, 60.0), &features);
    let names: Vec<_> = outcome.applied_rules.iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"HIGH_HUMAN_PRESSURE"));
    assert!(!names.contains(&"MODERATE_HUMAN_PRESSURE"));
}
