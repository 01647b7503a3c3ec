// ABOUTME: HTTP client construction for provider calls with bounded timeouts
// ABOUTME: Per-provider clients carrying their own deadline and a service user agent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use bionic_core::constants::service::{SERVICE_NAME, SERVICE_VERSION};

/// Connect timeout applied to every client
const CONNECT_TIMEOUT_SECS: u64 = 5;

fn builder(timeout: Duration) -> ClientBuilder {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
        .user_agent(format!("{SERVICE_NAME}/{SERVICE_VERSION}"))
}

/// Client with its own request deadline
///
/// Falls back to a default client if the TLS backend cannot be configured.
#[must_use]
pub fn client_with_timeout(timeout: Duration) -> Client {
    builder(timeout).build().unwrap_or_else(|_| Client::new())
}
