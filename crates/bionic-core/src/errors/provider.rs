// ABOUTME: Structured error type for external service calls (weather, adjustment service)
// ABOUTME: Classifies failures as retryable or terminal and maps them onto AppError codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Failure of an outbound provider call
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProviderError {
    /// Provider answered with a non-success status
    #[error("{provider} API error ({status_code}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Error message from the provider
        message: String,
        /// Whether the call may succeed on retry
        retryable: bool,
    },

    /// Connection-level failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request exceeded its deadline
    #[error("{provider} request timed out after {timeout_secs}s")]
    Timeout {
        /// Provider name
        provider: String,
        /// Configured timeout
        timeout_secs: u64,
    },

    /// Circuit breaker refuses calls for now
    #[error("{provider} circuit breaker open, retry after {retry_after_secs}s")]
    CircuitBreakerOpen {
        /// Provider name
        provider: String,
        /// Seconds until a recovery attempt is allowed
        retry_after_secs: u64,
    },

    /// Response body could not be decoded
    #[error("Failed to parse {provider} response field '{field}': {source}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Field or payload being parsed
        field: &'static str,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Response decoded but violates the contract
    #[error("{provider} returned invalid data: {message}")]
    InvalidData {
        /// Provider name
        provider: String,
        /// What was wrong
        message: String,
    },

    /// Provider is switched off by configuration
    #[error("{0} is disabled")]
    Disabled(String),
}

impl ProviderError {
    /// Whether the same call may succeed if repeated
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError { retryable, .. } => *retryable,
            Self::NetworkError(_) | Self::Timeout { .. } => true,
            Self::CircuitBreakerOpen { .. }
            | Self::ParseError { .. }
            | Self::InvalidData { .. }
            | Self::Disabled(_) => false,
        }
    }

    /// Map an HTTP status onto a retry classification
    #[must_use]
    pub const fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout {
                provider: error
                    .url()
                    .and_then(|url| url.host_str().map(str::to_owned))
                    .unwrap_or_else(|| "unknown".to_owned()),
                timeout_secs: 0,
            };
        }
        if let Some(status) = error.status() {
            return Self::ApiError {
                provider: "http".to_owned(),
                status_code: status.as_u16(),
                message: error.to_string(),
                retryable: Self::is_retryable_status(status.as_u16()),
            };
        }
        Self::NetworkError(error.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::ApiError { .. }
            | ProviderError::ParseError { .. }
            | ProviderError::InvalidData { .. } => ErrorCode::ExternalServiceError,
            ProviderError::NetworkError(_)
            | ProviderError::Timeout { .. }
            | ProviderError::CircuitBreakerOpen { .. }
            | ProviderError::Disabled(_) => ErrorCode::ExternalServiceUnavailable,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
