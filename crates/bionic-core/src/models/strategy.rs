// ABOUTME: Strategy models returned to tactical panels and the storefront
// ABOUTME: Stand projection, approach path, game movement, risks, products and live flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Direction of the projected score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// +3h projection at least 5 points above current
    Improving,
    /// +3h projection at least 5 points below current
    Degrading,
    /// Within 5 points
    Stable,
}

/// Three-level severity, ordered low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

impl RiskLevel {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Effect of the wind on game movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindImpact {
    /// Strong wind, game holds up
    Penalty,
    /// Steady moderate wind, game moves confidently
    Boost,
    /// No marked effect
    Neutral,
}

/// Expected game activity, ordered very low to very high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Very low
    VeryLow,
    /// Low
    Low,
    /// Moderate
    Moderate,
    /// High
    High,
    /// Very high
    VeryHigh,
}

impl ActivityLevel {
    /// One level higher, saturating
    #[must_use]
    pub const fn upgrade(self) -> Self {
        match self {
            Self::VeryLow => Self::Low,
            Self::Low => Self::Moderate,
            Self::Moderate => Self::High,
            Self::High | Self::VeryHigh => Self::VeryHigh,
        }
    }

    /// One level lower, saturating
    #[must_use]
    pub const fn downgrade(self) -> Self {
        match self {
            Self::VeryLow | Self::Low => Self::VeryLow,
            Self::Moderate => Self::Low,
            Self::High => Self::Moderate,
            Self::VeryHigh => Self::High,
        }
    }

    /// High or very high
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

/// Score projected over the next hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandProjection {
    /// Time-adjusted score now
    pub current: f64,
    /// Projection one hour ahead
    pub in_1h: f64,
    /// Projection three hours ahead
    pub in_3h: f64,
    /// Direction of the +3h projection
    pub trend: Trend,
    /// Hour with the highest projection over the next 12 hours
    pub peak_time: DateTime<FixedOffset>,
    /// Projection at the peak hour
    pub peak_score: f64,
}

/// Recommended approach to the waypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproachPath {
    /// Stealth score in [0,100]
    pub stealth_score: f64,
    /// Risk that game winds the hunter
    pub scent_risk: RiskLevel,
    /// Risk that game sees the hunter
    pub visual_risk: RiskLevel,
    /// Bearing to walk in, degrees
    pub recommended_direction: f64,
    /// Recommended stop-short distance in metres
    pub distance_meters: u32,
}

/// Predicted game movement around the waypoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMovement {
    /// Bearing of the main travel corridor, degrees
    pub primary_corridor: u16,
    /// Bearing of the secondary corridor, degrees
    pub secondary_corridor: u16,
    /// Expected arrival window (`HH:MM–HH:MM` or `Variable`)
    pub arrival_window: String,
    /// Wind effect
    pub wind_impact: WindImpact,
    /// Expected activity
    pub activity_level: ActivityLevel,
}

/// Kind of tactical risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    /// People in the area
    HumanPressure,
    /// Thermal inversion carrying scent
    ThermalInversion,
    /// Still air carrying noise
    WindNoise,
}

/// One identified risk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    /// Kind
    pub kind: RiskKind,
    /// Severity
    pub level: RiskLevel,
    /// Human-readable description
    pub description: String,
}

/// Risk evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Identified risks, most severe first
    pub risks: Vec<RiskItem>,
    /// Highest severity
    pub overall_level: RiskLevel,
    /// Suggested time to leave the stand (`HH:MM`)
    pub recommended_exit_time: String,
}

/// Product family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Scent attractant
    Attractant,
    /// Mineral supplement
    Mineral,
}

/// Product suggestion with placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecommendation {
    /// Catalogue identifier
    pub product_id: String,
    /// Display name
    pub name: String,
    /// Family
    pub category: ProductCategory,
    /// Quantity per application
    pub quantity: String,
    /// Reapplication cadence
    pub frequency: String,
    /// Distance from the waypoint in metres
    pub placement_offset_meters: u32,
    /// Bearing of the placement from the waypoint, degrees
    pub placement_direction: u16,
    /// Why the product is suggested
    pub reason: String,
}

/// Booleans driving live UI badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveFlags {
    /// Good score, no high risk, high activity
    pub is_optimal_now: bool,
    /// Degrading by more than 10 points within 3 hours
    pub will_degrade_soon: bool,
    /// High overall risk or a high thermal inversion
    pub is_risky_now: bool,
    /// Activity is high or very high
    pub peak_window_active: bool,
}

/// Territory-level context supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerritoryContext {
    /// Territory name
    #[serde(default)]
    pub name: Option<String>,
    /// Human pressure overriding the waypoint value, 0-100
    #[serde(default)]
    pub human_pressure: Option<f64>,
}

/// Tactical strategy for one waypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Score projection
    pub stand_projection: StandProjection,
    /// Approach analysis
    pub approach_path: ApproachPath,
    /// Game movement prediction
    pub game_movement: GameMovement,
    /// Risk evaluation
    pub risks: RiskAssessment,
    /// Product suggestions
    pub product_recommendations: Vec<ProductRecommendation>,
    /// Live badges
    pub live_flags: LiveFlags,
    /// One-line summary
    pub summary: String,
    /// Whether a weather snapshot informed the strategy
    pub weather_available: bool,
}
