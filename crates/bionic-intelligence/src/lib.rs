// ABOUTME: Pure scoring intelligence for Bionic Hunt waypoints
// ABOUTME: Configuration tables, scorers, rules, weather analysis and strategy without I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Bionic Intelligence
//!
//! Deterministic computation behind waypoint analysis. Nothing here touches
//! the network, the filesystem or the wall clock: timestamps are passed in
//! explicitly and configuration arrives as a snapshot.
//!
//! ## Modules
//!
//! - **config**: `ScoringConfig` with coefficient tables, shallow merge and validation
//! - **scoring**: elementary scorers, the six category aggregators and the composite
//! - **rules_engine**: expert rule table adjusting the composite (level 1)
//! - **weather_analysis**: thermal state, risk, fronts, hunting conditions and snapshots
//! - **calendar**: season, time of day, moon phase and rut period
//! - **rating**: score buckets with labels and colors
//! - **strategy**: tactical projection, approach, movement, risks and products
//! - **map_layers**: style contract for the territory map renderer

/// Scoring configuration, coefficient tables and validation
pub mod config;

/// Elementary scorers and category aggregation
pub mod scoring;

/// Expert rules applied over the composite score
pub mod rules_engine;

/// Weather analysis and snapshot derivation
pub mod weather_analysis;

/// Calendar helpers with explicit timestamps
pub mod calendar;

/// Rating classification
pub mod rating;

/// Tactical strategy engine
pub mod strategy;

/// Map layer styles
pub mod map_layers;

pub use config::{CategoryWeights, ConfigError, ScoringConfig, ScoringConfigUpdate, Thresholds};
pub use rules_engine::{apply_rules_engine, RulesEngine};
pub use scoring::{calculate_bionic_score, get_scores_for_waypoint, score_territory};
pub use strategy::get_strategy_for_waypoint;
pub use weather_analysis::build_weather_snapshot;
