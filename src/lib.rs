// ABOUTME: Main library entry point for the Bionic Hunt waypoint analysis engine
// ABOUTME: Wires configuration, data normalization, weather, hybrid scoring and strategy together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Bionic Hunt
//!
//! Scores hunting waypoints from terrain, vegetation, hydrography and
//! weather data, and derives a tactical strategy for each one.
//!
//! ## Architecture
//!
//! - **`bionic-core`**: shared models, errors and constants
//! - **`bionic-intelligence`**: pure scoring, rules, weather analysis and strategy
//! - **`bionic-providers`**: Open-Meteo and score adjustment clients
//! - **this crate**: configuration store, data adapter, weather cache,
//!   hybrid model and the analysis pipeline used by the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bionic_hunt::adapter::{DataAdapter, RawWaypointInput};
//! use bionic_hunt::analysis::{AnalysisRequest, WaypointAnalysisService};
//! use bionic_hunt::config::{ConfigStore, InMemoryPersistence};
//! use bionic_hunt::hybrid::HybridModel;
//!
//! #[tokio::main]
//! async fn main() -> bionic_hunt::errors::AppResult<()> {
//!     let store = Arc::new(ConfigStore::with_defaults(Arc::new(InMemoryPersistence::new())));
//!     let hybrid = Arc::new(HybridModel::new(store, None));
//!     let service = WaypointAnalysisService::new(DataAdapter::default(), None, hybrid);
//!
//!     let raw: RawWaypointInput = serde_json::from_str(
//!         r#"{"lat": 46.2, "lon": 4.8, "terrain": {"elevation": 320.0, "slope": 8.0}}"#,
//!     )?;
//!     let report = service.analyze(AnalysisRequest::new(raw)).await?;
//!     println!("{}", report.strategy.summary);
//!     Ok(())
//! }
//! ```

pub use bionic_core::{constants, errors, models};

/// Raw input normalization
pub mod adapter;

/// End-to-end waypoint analysis
pub mod analysis;

/// Environment settings and the scoring configuration store
pub mod config;

/// Hybrid scoring model
pub mod hybrid;

/// Structured logging setup
pub mod logging;

/// Cached weather snapshots
pub mod weather;
