// ABOUTME: Outbound provider integrations for weather forecasts and AI score adjustment
// ABOUTME: Provider traits, HTTP client helpers and circuit breaker for failing services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! External service providers and their resilience plumbing.
//!
//! Both integrations sit behind traits so callers and tests can inject
//! their own implementations: [`weather::WeatherProvider`] for forecasts and
//! [`ai_adjustment::AdjustmentProvider`] for the optional level-2 score
//! adjustment.

pub use bionic_core::errors;

/// AI score-adjustment client and payload types
pub mod ai_adjustment;
/// Circuit breaker for external calls
pub mod circuit_breaker;
/// Shared HTTP client construction
pub mod http_client;
/// Weather forecast providers
pub mod weather;

pub use ai_adjustment::{
    AdjustmentClientConfig, AdjustmentOutcome, AdjustmentProvider, AdjustmentRequest,
    AiAdjustment, HttpAdjustmentClient,
};
pub use bionic_core::errors::provider::ProviderError;
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use http_client::client_with_timeout;
pub use weather::{open_meteo::OpenMeteoProvider, WeatherProvider};
