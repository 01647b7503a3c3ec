// ABOUTME: Domain models shared across the scoring workspace
// ABOUTME: Re-exports waypoint, score, weather and strategy records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Domain models
//!
//! All records are plain data with serde derives; behaviour lives in
//! `bionic-intelligence` and the root crate.

/// Score records (sub-scores, rules, rating, hybrid result)
pub mod scores;
/// Strategy records
pub mod strategy;
/// Waypoint feature record and its enums
pub mod waypoint;
/// Weather provider payload and derived snapshot
pub mod weather;

pub use scores::{
    AiStatus, AppliedRule, HybridResult, Rating, RatingLevel, RulesOutcome, ScoreCategory,
    SkippedRule, SubScores,
};
pub use strategy::{
    ActivityLevel, ApproachPath, GameMovement, LiveFlags, ProductCategory, ProductRecommendation,
    RiskAssessment, RiskItem, RiskKind, RiskLevel, StandProjection, StrategyResult,
    TerritoryContext, Trend, WindImpact,
};
pub use waypoint::{
    CorridorData, CoverDensity, FeedingKind, FeedingZone, RestingZone, Season, StandType,
    ThermalConditions, TrailType, WaterType, WaypointFeatures,
};
pub use weather::{
    ConditionsRating, CurrentConditions, FrontType, HourlyForecast, HuntingConditions,
    OptimalWindow, RawCurrent, RawDaily, RawForecast, RawHourly, ThermalState, WeatherSnapshot,
};
