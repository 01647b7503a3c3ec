// ABOUTME: Scoring configuration commands
// ABOUTME: Show the effective config, apply a partial update from JSON, or reset to defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::fs;
use tracing::info;

use bionic_intelligence::ScoringConfigUpdate;

use super::print_json;
use crate::context::CliContext;

/// Print the effective scoring configuration
pub fn show(ctx: &CliContext) -> Result<()> {
    print_json(ctx.store.get().as_ref())
}

/// Apply the sections present in `file`
pub async fn update(ctx: &CliContext, file: &Path) -> Result<()> {
    let body = fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let update: ScoringConfigUpdate =
        serde_json::from_str(&body).context("Invalid configuration JSON")?;
    if update.is_empty() {
        bail!("{} contains no configuration section", file.display());
    }

    let updated = ctx.store.update(update).await?;
    info!(file = %file.display(), "Applied configuration update");
    print_json(updated.as_ref())
}

/// Restore the default configuration
pub async fn reset(ctx: &CliContext) -> Result<()> {
    let defaults = ctx.store.reset().await?;
    print_json(defaults.as_ref())
}
