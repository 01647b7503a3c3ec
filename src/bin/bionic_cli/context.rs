// ABOUTME: Shared CLI state built from the environment
// ABOUTME: Loads runtime settings, the persisted scoring config and the analysis components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use bionic_hunt::adapter::DataAdapter;
use bionic_hunt::analysis::WaypointAnalysisService;
use bionic_hunt::config::{
    ConfigPersistence, ConfigStore, FilePersistence, InMemoryPersistence, ServerConfig,
};
use bionic_hunt::hybrid::HybridModel;
use bionic_hunt::weather::WeatherService;
use bionic_providers::{AdjustmentProvider, HttpAdjustmentClient};

/// Components every command may need
pub struct CliContext {
    pub server: ServerConfig,
    pub store: Arc<ConfigStore>,
    pub weather: Arc<WeatherService>,
    pub analysis: WaypointAnalysisService,
}

impl CliContext {
    pub async fn from_env() -> Result<Self> {
        let server = ServerConfig::from_env()?;

        let backend: Arc<dyn ConfigPersistence> = if let Some(dir) = &server.config_dir {
            Arc::new(FilePersistence::new(dir))
        } else {
            warn!("No configuration directory available, changes will not persist");
            Arc::new(InMemoryPersistence::new())
        };
        let store = Arc::new(ConfigStore::load_or_default(backend).await);

        let adjuster = server.ai.client_config().map(|config| {
            info!(endpoint = %config.endpoint, "Score adjustment service enabled");
            Arc::new(HttpAdjustmentClient::new(config)) as Arc<dyn AdjustmentProvider>
        });
        let hybrid = Arc::new(HybridModel::new(Arc::clone(&store), adjuster));
        let weather = Arc::new(WeatherService::from_config(&server.weather));
        let analysis = WaypointAnalysisService::new(
            DataAdapter::default(),
            Some(Arc::clone(&weather)),
            hybrid,
        );

        Ok(Self {
            server,
            store,
            weather,
            analysis,
        })
    }
}
