// ABOUTME: Configuration error types for scoring configuration validation
// ABOUTME: Defines error variants for invalid weights, ranges and coefficient values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration error types for scoring configuration validation.

use bionic_core::errors::AppError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range bounds in the wrong order
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Category weights negative or not summing to 1
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// Stand coefficient outside [0,1]
    #[error("Stand coefficient '{field}' for '{stand}' must be within [0,1], got {value}")]
    InvalidCoefficient {
        /// Stand identifier
        stand: String,
        /// Coefficient name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Persisted configuration could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config_invalid(error.to_string())
    }
}
