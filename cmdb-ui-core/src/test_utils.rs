//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::context::UiContext;
use crate::error::{CoreError, CoreResult};
use crate::traits::{InMemoryKeyValueStore, KeyValueStore, Notifier};
use crate::types::{FieldErrors, Severity};

// ===== RecordingNotifier =====

/// Records every notification instead of showing it
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(Severity, String)> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn display(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

// ===== FailingKeyValueStore =====

/// Reads nothing, fails every write
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> CoreResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> CoreResult<()> {
        Err(CoreError::Storage(format!("disk full while writing {key}")))
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        Err(CoreError::Storage(format!("disk full while removing {key}")))
    }
}

// ===== 工厂方法 =====

pub fn field_errors(pairs: &[(&str, &str)]) -> FieldErrors {
    pairs
        .iter()
        .map(|(field, message)| ((*field).to_string(), (*message).to_string()))
        .collect()
}

/// 创建使用内存存储的 `UiContext`
pub fn create_test_context() -> (UiContext, Arc<RecordingNotifier>, Arc<InMemoryKeyValueStore>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let store = Arc::new(InMemoryKeyValueStore::new());
    let ctx = UiContext::new(notifier.clone(), store.clone());
    (ctx, notifier, store)
}
