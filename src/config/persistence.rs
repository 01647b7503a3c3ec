// ABOUTME: Key-value persistence backends for the scoring configuration blob
// ABOUTME: In-memory backend for tests and embedding, file backend storing one JSON file per key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use bionic_core::errors::{AppError, AppResult};

/// Storage of JSON blobs by key
#[async_trait]
pub trait ConfigPersistence: Send + Sync {
    /// Blob stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns `StorageError` or `SerializationError` when the blob cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous blob
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the blob cannot be written
    async fn set(&self, key: &str, value: &Value) -> AppResult<()>;

    /// Remove the blob under `key`; absent keys are not an error
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the blob exists but cannot be removed
    async fn clear(&self, key: &str) -> AppResult<()>;
}

/// Volatile backend
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    blobs: RwLock<HashMap<String, Value>>,
}

impl InMemoryPersistence {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigPersistence for InMemoryPersistence {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> AppResult<()> {
        self.blobs
            .write()
            .await
            .insert(key.to_owned(), value.clone());
        Ok(())
    }

    async fn clear(&self, key: &str) -> AppResult<()> {
        self.blobs.write().await.remove(key);
        Ok(())
    }
}

/// Backend writing `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    /// Store rooted at `dir`, created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the blobs
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl ConfigPersistence for FilePersistence {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn set(&self, key: &str, value: &Value) -> AppResult<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::storage(format!("Failed to create {}: {e}", self.dir.display()))
        })?;

        let path = self.path_for(key);
        let staging = self.dir.join(format!("{key}.json.tmp"));
        let body = serde_json::to_string_pretty(value)?;
        fs::write(&staging, body)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", staging.display())))?;
        fs::rename(&staging, &path)
            .await
            .map_err(|e| AppError::storage(format!("Failed to replace {}: {e}", path.display())))?;

        debug!(path = %path.display(), "Persisted configuration blob");
        Ok(())
    }

    async fn clear(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}
