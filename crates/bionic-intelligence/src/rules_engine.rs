// ABOUTME: Level-1 deterministic rules adding synergy bonuses and penalties to the composite
// ABOUTME: Ordered rule table with explicit not-applicable outcomes for missing optional data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Rules Engine
//!
//! Each rule inspects the sub-scores and the features and answers
//! [`RuleCheck::Triggered`], [`RuleCheck::NotTriggered`] or
//! [`RuleCheck::NotApplicable`] when the data it needs is absent.
//! Deltas of triggered rules are summed onto the composite, which is then
//! clamped to [0,100].

use bionic_core::constants::scores::{MAX_SCORE, MIN_SCORE};
use bionic_core::models::{
    AppliedRule, CoverDensity, RulesOutcome, SkippedRule, SubScores, WaypointFeatures,
};
use tracing::debug;

use crate::scoring::elementary::round1;

/// Outcome of evaluating one rule condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCheck {
    /// Condition holds, the delta applies
    Triggered,
    /// Condition evaluated to false
    NotTriggered,
    /// Condition needs a field that is missing
    NotApplicable(&'static str),
}

impl RuleCheck {
    const fn from_bool(condition: bool) -> Self {
        if condition {
            Self::Triggered
        } else {
            Self::NotTriggered
        }
    }
}

/// Condition evaluated against the base scores and features
pub type RuleCondition = fn(&SubScores, &WaypointFeatures) -> RuleCheck;

/// One entry of the rule table
#[derive(Debug, Clone, Copy)]
pub struct RuleDefinition {
    /// Stable identifier
    pub name: &'static str,
    /// Human-readable explanation
    pub description: &'static str,
    /// Points added when triggered
    pub delta: i32,
    /// Condition
    pub condition: RuleCondition,
}

fn habitat_rut_synergy(scores: &SubScores, _: &WaypointFeatures) -> RuleCheck {
    RuleCheck::from_bool(scores.habitat >= 70.0 && scores.rut >= 70.0)
}

fn water_corridor_synergy(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    features.corridor.map_or(RuleCheck::NotApplicable("corridor"), |c| {
        RuleCheck::from_bool(features.water_distance <= 200.0 && c.on_corridor)
    })
}

fn feeding_resting_proximity(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    match (&features.feeding_zone, &features.resting_zone) {
        (Some(feeding), Some(resting)) => {
            RuleCheck::from_bool(feeding.distance <= 300.0 && resting.distance <= 300.0)
        }
        (None, _) => RuleCheck::NotApplicable("feeding_zone"),
        (_, None) => RuleCheck::NotApplicable("resting_zone"),
    }
}

fn confluence_saline(scores: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    RuleCheck::from_bool(features.has_confluence && scores.salines >= 60.0)
}

fn transition_edge(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    RuleCheck::from_bool(features.is_transition && features.adjacent_stands.len() >= 2)
}

fn high_human_pressure(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    features
        .human_pressure
        .map_or(RuleCheck::NotApplicable("human_pressure"), |p| {
            RuleCheck::from_bool(p > 70.0)
        })
}

fn moderate_human_pressure(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    features
        .human_pressure
        .map_or(RuleCheck::NotApplicable("human_pressure"), |p| {
            RuleCheck::from_bool(p > 50.0 && p <= 70.0)
        })
}

fn steep_slope(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    RuleCheck::from_bool(features.slope > 35.0)
}

fn poor_connectivity(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    features.corridor.map_or(RuleCheck::NotApplicable("corridor"), |c| {
        RuleCheck::from_bool(c.connectivity < 0.2)
    })
}

fn exposed_sparse_cover(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    match (features.cover_density, features.visibility) {
        (Some(cover), Some(visibility)) => {
            RuleCheck::from_bool(cover == CoverDensity::Sparse && visibility > 80.0)
        }
        (None, _) => RuleCheck::NotApplicable("cover_density"),
        (_, None) => RuleCheck::NotApplicable("visibility"),
    }
}

fn disturbed_resting_zone(_: &SubScores, features: &WaypointFeatures) -> RuleCheck {
    features
        .resting_zone
        .map_or(RuleCheck::NotApplicable("resting_zone"), |r| {
            RuleCheck::from_bool(r.distance < 200.0 && !r.disturbance_free)
        })
}

/// Default rule table, evaluated in order
pub const DEFAULT_RULES: [RuleDefinition; 11] = [
    RuleDefinition {
        name: "HABITAT_RUT_SYNERGY",
        description: "Strong habitat and rut scores reinforce each other",
        delta: 8,
        condition: habitat_rut_synergy,
    },
    RuleDefinition {
        name: "WATER_CORRIDOR_SYNERGY",
        description: "Travel corridor within 200 m of water",
        delta: 6,
        condition: water_corridor_synergy,
    },
    RuleDefinition {
        name: "FEEDING_RESTING_PROXIMITY",
        description: "Feeding and resting zones both within 300 m",
        delta: 5,
        condition: feeding_resting_proximity,
    },
    RuleDefinition {
        name: "CONFLUENCE_SALINE",
        description: "Confluence next to a good salines area",
        delta: 4,
        condition: confluence_saline,
    },
    RuleDefinition {
        name: "TRANSITION_EDGE",
        description: "Edge between at least two bordering stands",
        delta: 4,
        condition: transition_edge,
    },
    RuleDefinition {
        name: "HIGH_HUMAN_PRESSURE",
        description: "Heavy human presence above 70",
        delta: -12,
        condition: high_human_pressure,
    },
    RuleDefinition {
        name: "MODERATE_HUMAN_PRESSURE",
        description: "Human presence between 50 and 70",
        delta: -5,
        condition: moderate_human_pressure,
    },
    RuleDefinition {
        name: "STEEP_SLOPE",
        description: "Slope steeper than 35 degrees",
        delta: -6,
        condition: steep_slope,
    },
    RuleDefinition {
        name: "POOR_CONNECTIVITY",
        description: "Isolated patch with connectivity under 0.2",
        delta: -5,
        condition: poor_connectivity,
    },
    RuleDefinition {
        name: "EXPOSED_SPARSE_COVER",
        description: "Sparse cover with visibility above 80",
        delta: -4,
        condition: exposed_sparse_cover,
    },
    RuleDefinition {
        name: "DISTURBED_RESTING_ZONE",
        description: "Disturbed resting zone closer than 200 m",
        delta: -3,
        condition: disturbed_resting_zone,
    },
];

/// Ordered rule table applied to a composite score
#[derive(Debug, Clone)]
pub struct RulesEngine {
    rules: Vec<RuleDefinition>,
}

impl RulesEngine {
    /// Engine with the default rule table
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    /// Engine with a custom rule table
    #[must_use]
    pub const fn with_rules(rules: Vec<RuleDefinition>) -> Self {
        Self { rules }
    }

    /// `(name, description)` of every rule, in evaluation order
    #[must_use]
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.name, r.description)).collect()
    }

    /// Apply every rule to the composite of `scores`
    #[must_use]
    pub fn apply(&self, scores: &SubScores, features: &WaypointFeatures) -> RulesOutcome {
        let mut applied_rules = Vec::new();
        let mut skipped_rules = Vec::new();
        let mut rules_adjustment = 0_i32;

        for rule in &self.rules {
            match (rule.condition)(scores, features) {
                RuleCheck::Triggered => {
                    debug!(rule = rule.name, delta = rule.delta, "Rule applied");
                    rules_adjustment += rule.delta;
                    applied_rules.push(AppliedRule {
                        name: rule.name.to_owned(),
                        delta: rule.delta,
                        description: rule.description.to_owned(),
                    });
                }
                RuleCheck::NotTriggered => {}
                RuleCheck::NotApplicable(missing) => {
                    debug!(rule = rule.name, missing, "Rule not applicable");
                    skipped_rules.push(SkippedRule {
                        name: rule.name.to_owned(),
                        missing: missing.to_owned(),
                    });
                }
            }
        }

        let score = round1(
            (scores.composite + f64::from(rules_adjustment)).clamp(MIN_SCORE, MAX_SCORE),
        );
        RulesOutcome {
            score,
            applied_rules,
            rules_adjustment,
            skipped_rules,
        }
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the default rule table
#[must_use]
pub fn apply_rules_engine(scores: &SubScores, features: &WaypointFeatures) -> RulesOutcome {
    RulesEngine::new().apply(scores, features)
}
