// ABOUTME: Command modules of the bionic-hunt CLI
// ABOUTME: Waypoint analysis, weather lookup and scoring configuration management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod analyze;
pub mod config;
pub mod weather;

use anyhow::Result;
use serde::Serialize;

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
