//! Key-value persistence abstraction

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// Key-value store Trait
///
/// Values are opaque strings (JSON in practice). Used by the filter engine to
/// persist its state under a caller-supplied key.
///
/// Platform implementations:
/// - Terminal front-end: `JsonFileStore` (single JSON file in the config directory)
/// - Tests / ephemeral sessions: [`InMemoryKeyValueStore`]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    ///
    /// # Returns
    /// * `Ok(Some(value))` - key exists
    /// * `Ok(None)` - key does not exist
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a key (missing keys are not an error)
    async fn remove(&self, key: &str) -> CoreResult<()>;
}

/// In-memory key-value store
///
/// Default implementation, available on all platforms.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
