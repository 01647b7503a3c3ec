// ABOUTME: Configuration module: environment runtime settings and the persisted scoring config store
// ABOUTME: Re-exports ServerConfig, ConfigStore and the persistence backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration
//!
//! Runtime settings come from the environment only. The scoring
//! configuration lives in a [`ConfigStore`] backed by a pluggable
//! [`ConfigPersistence`].

/// Environment-based runtime configuration
pub mod environment;
/// Persistence backends for the scoring configuration
pub mod persistence;
/// Scoring configuration store
pub mod store;

pub use environment::{AiServiceConfig, ServerConfig, WeatherServiceConfig};
pub use persistence::{ConfigPersistence, FilePersistence, InMemoryPersistence};
pub use store::ConfigStore;
