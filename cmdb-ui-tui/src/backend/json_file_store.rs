//! 键值存储
//!
//! 使用单个 JSON 文件保存界面状态（筛选条件等）
//! 实现 cmdb-ui-core 的 KeyValueStore trait

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use cmdb_ui_core::traits::KeyValueStore;
use cmdb_ui_core::{CoreError, CoreResult};
use tokio::fs;
use tokio::sync::Mutex;

/// 基于 JSON 文件的键值存储
pub struct JsonFileStore {
    path: PathBuf,
    /// 内存缓存，None 表示尚未从文件加载
    cache: Mutex<Option<BTreeMap<String, String>>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// 从文件加载全部条目
    async fn load_from_file(&self) -> CoreResult<BTreeMap<String, String>> {
        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?
        {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?;

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // 文件损坏时从空状态开始，下一次写入会覆盖
                log::warn!("Ignoring unreadable state file {}: {e}", self.path.display());
                Ok(BTreeMap::new())
            }
        }
    }

    /// 保存全部条目到文件
    async fn save_to_file(&self, entries: &BTreeMap<String, String>) -> CoreResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| CoreError::Storage(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| CoreError::Storage(e.to_string()))?;
        Ok(())
    }

    /// 在锁内修改条目并写回文件
    async fn modify(&self, edit: impl FnOnce(&mut BTreeMap<String, String>)) -> CoreResult<()> {
        let mut cache = self.cache.lock().await;
        let mut entries = match cache.take() {
            Some(entries) => entries,
            None => self.load_from_file().await?,
        };
        edit(&mut entries);
        let result = self.save_to_file(&entries).await;
        *cache = Some(entries);
        result
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load_from_file().await?);
        }
        Ok(cache.as_ref().and_then(|entries| entries.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
        .await
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cmdb-ui-tui-test-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[tokio::test]
    async fn values_survive_a_new_store_instance() {
        let path = temp_path("state.json");
        let store = JsonFileStore::new(&path);
        store.set("assets.filters", r#"{"globalSearch":"plc"}"#).await.unwrap();
        store.set("other", "1").await.unwrap();
        store.remove("other").await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get("assets.filters").await.unwrap().as_deref(),
            Some(r#"{"globalSearch":"plc"}"#)
        );
        assert_eq!(reopened.get("other").await.unwrap(), None);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let path = temp_path("state.json");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, "{not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("anything").await.unwrap(), None);

        store.set("k", "v").await.unwrap();
        assert_eq!(JsonFileStore::new(&path).get("k").await.unwrap().as_deref(), Some("v"));

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
