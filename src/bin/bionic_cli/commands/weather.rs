// ABOUTME: Weather lookup command
// ABOUTME: Prints the derived snapshot for a location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use anyhow::Result;

use super::print_json;
use crate::context::CliContext;

/// Print the weather snapshot at `lat`, `lon`
pub async fn show(ctx: &CliContext, lat: f64, lon: f64) -> Result<()> {
    let snapshot = ctx.weather.fetch_weather_data(lat, lon).await?;
    print_json(&snapshot)
}
