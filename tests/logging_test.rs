// ABOUTME: Integration tests for logging configuration
// ABOUTME: Covers environment parsing of level and format and filter construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use serial_test::serial;

use bionic_hunt::logging::{LogFormat, LoggingConfig};

const LOGGING_VARS: [&str; 5] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    "LOG_INCLUDE_SPANS",
];

fn clear_logging_env() {
    for var in LOGGING_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_logging_env();
    let config = LoggingConfig::from_env();
    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Compact);
    assert!(!config.include_location);
    assert!(!config.include_spans);
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_logging_env();
    env::set_var("RUST_LOG", "bionic_hunt=debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_LOCATION", "1");
    env::set_var("LOG_INCLUDE_SPANS", "1");

    let config = LoggingConfig::from_env();
    clear_logging_env();

    assert_eq!(config.level, "bionic_hunt=debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(config.include_spans);
    assert!(!config.include_thread);
}

#[test]
fn test_env_filter_quiets_http_internals() {
    let filter = LoggingConfig::default().with_level("debug").env_filter();
    let rendered = filter.to_string();
    assert!(rendered.contains("debug"));
    assert!(rendered.contains("reqwest=warn"));
    assert!(rendered.contains("hyper=warn"));
}
