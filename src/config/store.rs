// ABOUTME: Long-lived store of the scoring configuration with snapshot reads and validated writes
// ABOUTME: Loads persisted overrides over defaults, shallow-merges updates, persists every change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{info, warn};

use bionic_core::constants::persistence::SCORING_CONFIG_KEY;
use bionic_core::errors::AppResult;
use bionic_intelligence::config::{ScoringConfig, ScoringConfigUpdate};

use super::persistence::ConfigPersistence;

/// Scoring configuration shared by every request
///
/// Readers get an `Arc` snapshot and never observe a half-applied update.
/// Writers are serialized; each accepted write is persisted before it
/// becomes visible.
pub struct ConfigStore {
    current: RwLock<Arc<ScoringConfig>>,
    writer: Mutex<()>,
    backend: Arc<dyn ConfigPersistence>,
}

impl ConfigStore {
    /// Store holding defaults, ignoring anything persisted
    #[must_use]
    pub fn with_defaults(backend: Arc<dyn ConfigPersistence>) -> Self {
        Self {
            current: RwLock::new(Arc::new(ScoringConfig::default())),
            writer: Mutex::new(()),
            backend,
        }
    }

    /// Store initialized from persisted overrides merged over defaults
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend fails, `ConfigInvalid` when
    /// the merged configuration breaks an invariant.
    pub async fn load(backend: Arc<dyn ConfigPersistence>) -> AppResult<Self> {
        let config = match backend.get(SCORING_CONFIG_KEY).await? {
            Some(persisted) => {
                let merged = ScoringConfig::default().overlay_json(&persisted)?;
                merged.validate()?;
                info!("Loaded persisted scoring configuration");
                merged
            }
            None => ScoringConfig::default(),
        };
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
            writer: Mutex::new(()),
            backend,
        })
    }

    /// Like [`ConfigStore::load`], falling back to defaults on failure
    pub async fn load_or_default(backend: Arc<dyn ConfigPersistence>) -> Self {
        match Self::load(Arc::clone(&backend)).await {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Persisted scoring configuration rejected, using defaults");
                Self::with_defaults(backend)
            }
        }
    }

    /// Snapshot of the current configuration
    #[must_use]
    pub fn get(&self) -> Arc<ScoringConfig> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn publish(&self, config: ScoringConfig) -> Arc<ScoringConfig> {
        let snapshot = Arc::new(config);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        snapshot
    }

    /// Replace the sections present in `update`, validate, persist
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the merged configuration breaks an invariant
    /// (nothing is persisted or published), or a storage error.
    pub async fn update(&self, update: ScoringConfigUpdate) -> AppResult<Arc<ScoringConfig>> {
        let _guard = self.writer.lock().await;

        let merged = self.get().merged(update);
        merged.validate()?;
        self.backend
            .set(SCORING_CONFIG_KEY, &serde_json::to_value(&merged)?)
            .await?;

        info!("Scoring configuration updated");
        Ok(self.publish(merged))
    }

    /// Restore defaults and delete the persisted blob
    ///
    /// # Errors
    ///
    /// Returns a storage error if the blob cannot be removed
    pub async fn reset(&self) -> AppResult<Arc<ScoringConfig>> {
        let _guard = self.writer.lock().await;

        self.backend.clear(SCORING_CONFIG_KEY).await?;
        info!("Scoring configuration reset to defaults");
        Ok(self.publish(ScoringConfig::default()))
    }
}
