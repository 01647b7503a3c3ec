// ABOUTME: Waypoint score and strategy commands
// ABOUTME: Parse raw waypoint JSON from a file or stdin and run the analysis pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs;
use tokio::io::{self, AsyncReadExt};
use uuid::Uuid;

use bionic_hunt::adapter::RawWaypointInput;
use bionic_hunt::analysis::{AnalysisReport, AnalysisRequest};
use bionic_hunt::models::HybridResult;

use super::print_json;
use crate::context::CliContext;

/// Output of `score`: the hybrid result without the strategy
#[derive(Serialize)]
struct ScoreOutput<'a> {
    analysis_id: Uuid,
    weather_available: bool,
    #[serde(flatten)]
    hybrid: &'a HybridResult,
}

async fn read_input(path: &Path) -> Result<RawWaypointInput> {
    let body = if path.as_os_str() == "-" {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body).await?;
        body
    } else {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&body).context("Invalid waypoint JSON")
}

async fn run(ctx: &CliContext, input: &Path, use_ai: bool, use_weather: bool) -> Result<AnalysisReport> {
    let request = AnalysisRequest {
        use_ai,
        use_weather,
        ..AnalysisRequest::new(read_input(input).await?)
    };
    Ok(ctx.analysis.analyze(request).await?)
}

/// Print the hybrid score of a waypoint
pub async fn score(ctx: &CliContext, input: &Path, use_ai: bool, use_weather: bool) -> Result<()> {
    let report = run(ctx, input, use_ai, use_weather).await?;
    print_json(&ScoreOutput {
        analysis_id: report.analysis_id,
        weather_available: report.weather.is_some(),
        hybrid: &report.hybrid,
    })
}

/// Print the full analysis report
pub async fn strategy(
    ctx: &CliContext,
    input: &Path,
    use_ai: bool,
    use_weather: bool,
) -> Result<()> {
    let report = run(ctx, input, use_ai, use_weather).await?;
    print_json(&report)
}
