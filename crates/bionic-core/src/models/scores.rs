// ABOUTME: Score records produced by the scoring, rules and hybrid stages
// ABOUTME: Category sub-scores, rule outcomes, rating classification and the hybrid result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six weighted scoring categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    /// Food and shelter availability (H)
    Habitat,
    /// Rut suitability (R)
    Rut,
    /// Water and mineral licks (S)
    Salines,
    /// Stand or blind placement quality (A)
    Affuts,
    /// Travel corridors (T)
    Trajets,
    /// Forest stand quality (P)
    Peuplements,
}

impl ScoreCategory {
    /// All categories in canonical order
    pub const ALL: [Self; 6] = [
        Self::Habitat,
        Self::Rut,
        Self::Salines,
        Self::Affuts,
        Self::Trajets,
        Self::Peuplements,
    ];

    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Habitat => "habitat",
            Self::Rut => "rut",
            Self::Salines => "salines",
            Self::Affuts => "affuts",
            Self::Trajets => "trajets",
            Self::Peuplements => "peuplements",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Six category sub-scores and their weighted composite, all in [0,100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    /// Habitat (H)
    pub habitat: f64,
    /// Rut (R)
    pub rut: f64,
    /// Salines (S)
    pub salines: f64,
    /// Affuts (A)
    pub affuts: f64,
    /// Trajets (T)
    pub trajets: f64,
    /// Peuplements (P)
    pub peuplements: f64,
    /// Weighted composite
    pub composite: f64,
}

impl SubScores {
    /// Sub-score of one category
    #[must_use]
    pub const fn get(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Habitat => self.habitat,
            ScoreCategory::Rut => self.rut,
            ScoreCategory::Salines => self.salines,
            ScoreCategory::Affuts => self.affuts,
            ScoreCategory::Trajets => self.trajets,
            ScoreCategory::Peuplements => self.peuplements,
        }
    }
}

/// A rule that contributed to the level-1 score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRule {
    /// Rule identifier
    pub name: String,
    /// Points added (negative for penalties)
    pub delta: i32,
    /// Human-readable explanation
    pub description: String,
}

/// A rule skipped because the data it needs is missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRule {
    /// Rule identifier
    pub name: String,
    /// Name of the missing input
    pub missing: String,
}

/// Result of applying the rule table to a composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesOutcome {
    /// Composite plus applied deltas, clamped to [0,100]
    pub score: f64,
    /// Rules whose condition held, in table order
    pub applied_rules: Vec<AppliedRule>,
    /// Sum of applied deltas before clamping
    pub rules_adjustment: i32,
    /// Rules that could not be evaluated
    pub skipped_rules: Vec<SkippedRule>,
}

/// Rating bucket of a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingLevel {
    /// At or above the excellent threshold
    Excellent,
    /// At or above the good threshold
    Good,
    /// At or above the moderate threshold
    Moderate,
    /// At or above the low threshold
    Low,
    /// Below every threshold
    Poor,
}

impl RatingLevel {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Low => "low",
            Self::Poor => "poor",
        }
    }
}

/// Rating shown next to a score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Bucket
    pub level: RatingLevel,
    /// Display label
    pub label: String,
    /// Hex color
    pub color: String,
}

/// How the external adjustment stage ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiStatus {
    /// The service answered and its score was used
    Adjusted,
    /// The caller or configuration turned the call off
    Disabled,
    /// The call failed and the rules-only score was kept
    Unavailable,
}

/// Output of the two-tier hybrid model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridResult {
    /// Base category scores
    pub scores: SubScores,
    /// Composite after level-1 rules
    pub score_after_rules: f64,
    /// Rules that fired
    pub applied_rules: Vec<AppliedRule>,
    /// Sum of applied rule deltas
    pub rules_adjustment: i32,
    /// Rules skipped for missing data
    pub skipped_rules: Vec<SkippedRule>,
    /// Final score in [0,100]
    pub score_final: f64,
    /// Points added by the adjustment service
    pub ai_adjustment: f64,
    /// Recommendations returned by the adjustment service
    pub ai_recommendations: Vec<String>,
    /// Confidence reported by the adjustment service, 0 when unused
    pub ai_confidence: f64,
    /// Reasoning reported by the adjustment service
    pub ai_reasoning: Option<String>,
    /// Outcome of the adjustment stage
    pub ai_status: AiStatus,
    /// Rating of the final score
    pub rating: Rating,
}
