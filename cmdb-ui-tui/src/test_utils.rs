//! 测试辅助模块
//!
//! 使用演示数据后端和内存存储构建完整的 App，
//! 后台任务的完成消息从 `rx` 中取出后再交给 update。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cmdb_ui_core::traits::{InMemoryKeyValueStore, KeyValueStore};
use cmdb_ui_core::types::Severity;
use cmdb_ui_core::{CoreError, CoreResult, FilterEngine, UiContext};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::backend::InMemoryAssetBackend;
use crate::message::AppMessage;
use crate::model::{App, ToastQueue};

pub const FILTER_KEY: &str = "assets.filters";

// ===== FailingKeyValueStore =====

/// Reads nothing, fails every write
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> CoreResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> CoreResult<()> {
        Err(CoreError::Storage(format!("read-only file system: {key}")))
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        Err(CoreError::Storage(format!("read-only file system: {key}")))
    }
}

// ===== 工厂方法 =====

/// 以 ToastQueue 作为通知渠道的 `UiContext`
pub fn create_test_context() -> (UiContext, Arc<ToastQueue>, Arc<InMemoryKeyValueStore>) {
    let toasts = Arc::new(ToastQueue::new(Duration::from_secs(60)));
    let store = Arc::new(InMemoryKeyValueStore::new());
    let ctx = UiContext::new(toasts.clone(), store.clone());
    (ctx, toasts, store)
}

pub struct TestApp {
    pub app: App,
    pub rx: UnboundedReceiver<AppMessage>,
    pub toasts: Arc<ToastQueue>,
    pub store: Arc<dyn KeyValueStore>,
}

impl TestApp {
    /// 等待下一条后台任务消息
    pub async fn next_message(&mut self) -> AppMessage {
        match tokio::time::timeout(Duration::from_secs(5), self.rx.recv()).await {
            Ok(Some(msg)) => msg,
            Ok(None) => panic!("message channel closed"),
            Err(_) => panic!("no background message within 5s"),
        }
    }

    /// 最近一条提示
    pub fn last_toast(&self) -> Option<(Severity, String)> {
        self.toasts
            .active()
            .last()
            .map(|t| (t.severity, t.message.clone()))
    }
}

/// 使用演示数据（无延迟）和给定存储的 App
pub async fn create_test_app_with_store(store: Arc<dyn KeyValueStore>) -> TestApp {
    let toasts = Arc::new(ToastQueue::new(Duration::from_secs(60)));
    let ctx = UiContext::new(toasts.clone(), Arc::clone(&store));
    let filters = ctx
        .filters(FILTER_KEY)
        .await
        .unwrap_or_else(|_| FilterEngine::new());
    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::new(
        &ctx,
        toasts.clone(),
        Arc::new(InMemoryAssetBackend::with_demo_data()),
        filters,
        tx,
    );
    TestApp {
        app,
        rx,
        toasts,
        store,
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_store(Arc::new(InMemoryKeyValueStore::new())).await
}
