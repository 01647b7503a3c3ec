// ABOUTME: Circuit breaker guarding calls to external services
// ABOUTME: Opens after consecutive failures, then lets a single trial call through after a cool-down
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::future::Future;
use std::sync::atomic::{AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use bionic_core::constants::ai::{DEFAULT_FAILURE_THRESHOLD, DEFAULT_RECOVERY_SECS};
use bionic_core::errors::provider::ProviderError;

/// Breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls pass through
    Closed,
    /// Calls are refused
    Open,
    /// One trial call is in flight
    HalfOpen,
}

impl CircuitState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Closed,
            1 => Self::Open,
            _ => Self::HalfOpen,
        }
    }

    const fn to_u8(self) -> u8 {
        match self {
            Self::Closed => 0,
            Self::Open => 1,
            Self::HalfOpen => 2,
        }
    }
}

/// Thresholds of a breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit
    pub failure_threshold: u32,
    /// Cool-down before a trial call is allowed
    pub recovery_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            recovery_timeout: Duration::from_secs(DEFAULT_RECOVERY_SECS),
        }
    }
}

impl CircuitBreakerConfig {
    /// Breaker opening after `failure_threshold` failures for `recovery_timeout`
    #[must_use]
    pub const fn new(failure_threshold: u32, recovery_timeout: Duration) -> Self {
        Self {
            failure_threshold,
            recovery_timeout,
        }
    }
}

/// Lock-free circuit breaker shared by concurrent requests
///
/// Every failed call counts towards the threshold; a success in the closed
/// state resets the count. Once open, calls fail fast with
/// `ProviderError::CircuitBreakerOpen` until the cool-down elapses. The first
/// call after that is a trial: success closes the circuit, failure re-opens it.
/// A trial dropped before it settles hands the slot back to the next caller.
#[derive(Debug)]
pub struct CircuitBreaker {
    service: String,
    state: AtomicU8,
    consecutive_failures: AtomicU32,
    opened_at_ms: AtomicU64,
    config: CircuitBreakerConfig,
    epoch: Instant,
}

impl CircuitBreaker {
    /// Breaker with default thresholds
    #[must_use]
    pub fn new(service: &str) -> Self {
        Self::with_config(service, CircuitBreakerConfig::default())
    }

    /// Breaker with explicit thresholds
    #[must_use]
    pub fn with_config(service: &str, config: CircuitBreakerConfig) -> Self {
        Self {
            service: service.to_owned(),
            state: AtomicU8::new(CircuitState::Closed.to_u8()),
            consecutive_failures: AtomicU32::new(0),
            opened_at_ms: AtomicU64::new(0),
            config,
            epoch: Instant::now(),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> CircuitState {
        CircuitState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Consecutive failures recorded while closed
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::SeqCst)
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn open(&self) {
        self.state
            .store(CircuitState::Open.to_u8(), Ordering::SeqCst);
        self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst);
    }

    fn remaining_cooldown_ms(&self) -> u64 {
        let since_open = self
            .now_ms()
            .saturating_sub(self.opened_at_ms.load(Ordering::SeqCst));
        (self.config.recovery_timeout.as_millis() as u64).saturating_sub(since_open)
    }

    /// Whether a call may proceed; claims the trial slot when the cool-down is over
    #[must_use]
    pub fn try_acquire(&self) -> bool {
        match self.state() {
            CircuitState::Closed => true,
            CircuitState::HalfOpen => false,
            CircuitState::Open => {
                self.remaining_cooldown_ms() == 0
                    && self
                        .state
                        .compare_exchange(
                            CircuitState::Open.to_u8(),
                            CircuitState::HalfOpen.to_u8(),
                            Ordering::SeqCst,
                            Ordering::SeqCst,
                        )
                        .is_ok()
            }
        }
    }

    /// Record a successful call
    pub fn record_success(&self) {
        if self.state() == CircuitState::HalfOpen {
            info!(service = %self.service, "Circuit breaker closed after successful trial call");
        }
        self.state
            .store(CircuitState::Closed.to_u8(), Ordering::SeqCst);
        self.consecutive_failures.store(0, Ordering::SeqCst);
    }

    /// Record a failed call
    pub fn record_failure(&self) {
        match self.state() {
            CircuitState::Closed => {
                let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
                if failures >= self.config.failure_threshold {
                    self.open();
                    warn!(
                        service = %self.service,
                        failures,
                        recovery_secs = self.config.recovery_timeout.as_secs(),
                        "Circuit breaker opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                self.open();
                warn!(service = %self.service, "Circuit breaker re-opened after failed trial call");
            }
            CircuitState::Open => {}
        }
    }

    /// Run `operation` unless the circuit is open
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::CircuitBreakerOpen` without running the
    /// operation when the circuit refuses calls, otherwise the operation's error.
    pub async fn call<F, T>(&self, operation: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        if !self.try_acquire() {
            return Err(ProviderError::CircuitBreakerOpen {
                provider: self.service.clone(),
                retry_after_secs: self.remaining_cooldown_ms().div_ceil(1000),
            });
        }

        let mut in_flight = InFlight {
            breaker: self,
            settled: false,
        };
        let result = operation.await;
        match &result {
            Ok(_) => self.record_success(),
            Err(_) => self.record_failure(),
        }
        in_flight.settled = true;
        result
    }

    /// Return an unsettled trial slot so the next call can claim it
    fn abandon_trial(&self) {
        if self
            .state
            .compare_exchange(
                CircuitState::HalfOpen.to_u8(),
                CircuitState::Open.to_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
        {
            debug!(service = %self.service, "Trial call dropped before completion");
        }
    }
}

/// Marks a call admitted by the breaker until its outcome is recorded
struct InFlight<'a> {
    breaker: &'a CircuitBreaker,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.breaker.abandon_trial();
        }
    }
}
