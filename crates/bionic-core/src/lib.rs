// ABOUTME: Core types and constants for the Bionic Hunt territory engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Bionic Core
//!
//! Foundation crate providing shared types and constants for the Bionic Hunt
//! waypoint scoring engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ProviderError`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Waypoint features, sub-scores, weather snapshots and strategy results

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (waypoints, scores, weather, strategy)
pub mod models;
