// ABOUTME: Bionic Hunt CLI for scoring waypoints, building strategies and managing the scoring config
// ABOUTME: Reads raw waypoint JSON, prints JSON results on stdout and logs on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Hybrid score of a waypoint
//! bionic-hunt score --input waypoint.json
//!
//! # Full strategy without the adjustment service
//! bionic-hunt strategy --input waypoint.json --no-ai
//!
//! # Weather snapshot for a location
//! bionic-hunt weather --lat 46.2 --lon 4.8
//!
//! # Inspect, update or reset the scoring configuration
//! bionic-hunt config show
//! bionic-hunt config update --file overrides.json
//! bionic-hunt config reset
//! ```

mod commands;
mod context;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use bionic_hunt::logging::LoggingConfig;

use context::CliContext;

#[derive(Parser)]
#[command(
    name = "bionic-hunt",
    version,
    about = "Bionic Hunt waypoint scoring engine",
    long_about = "Scores hunting waypoints, derives tactical strategies and manages the scoring configuration."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Flags shared by the waypoint commands
#[derive(clap::Args)]
struct WaypointArgs {
    /// Raw waypoint JSON file, `-` for stdin
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Skip the adjustment service
    #[arg(long)]
    no_ai: bool,

    /// Skip the weather fetch
    #[arg(long)]
    no_weather: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Hybrid score of a waypoint
    Score(WaypointArgs),

    /// Full analysis with tactical strategy
    Strategy(WaypointArgs),

    /// Weather snapshot for a location
    Weather {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Scoring configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Apply a partial configuration from a JSON file
    Update {
        /// JSON file holding the sections to replace
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Restore defaults and delete the persisted overrides
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let ctx = CliContext::from_env().await?;
    debug!(settings = %ctx.server.summary(), "CLI context ready");

    match cli.command {
        Command::Score(args) => {
            commands::analyze::score(&ctx, &args.input, !args.no_ai, !args.no_weather).await
        }
        Command::Strategy(args) => {
            commands::analyze::strategy(&ctx, &args.input, !args.no_ai, !args.no_weather).await
        }
        Command::Weather { lat, lon } => commands::weather::show(&ctx, lat, lon).await,
        Command::Config { action } => match action {
            ConfigCommand::Show => commands::config::show(&ctx),
            ConfigCommand::Update { file } => commands::config::update(&ctx, &file).await,
            ConfigCommand::Reset => commands::config::reset(&ctx).await,
        },
    }
}
