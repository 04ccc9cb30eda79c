//! Shared collaborators for a page's controllers

use std::sync::Arc;

use crate::controllers::{
    ConfirmationGate, DialogController, FilterEngine, FormController, RequestRunner,
};
use crate::error::CoreResult;
use crate::traits::{KeyValueStore, Notifier};

/// UI 上下文 - 持有所有依赖
///
/// The front-end creates one context with its notification and persistence
/// implementations, then builds controllers from it.
#[derive(Clone)]
pub struct UiContext {
    /// 通知渠道
    pub notifier: Arc<dyn Notifier>,
    /// 筛选状态持久化
    pub store: Arc<dyn KeyValueStore>,
}

impl UiContext {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { notifier, store }
    }

    pub fn request_runner<T: Clone>(&self) -> RequestRunner<T> {
        RequestRunner::new(Arc::clone(&self.notifier))
    }

    pub fn form<F: Clone + Send + Sync + 'static>(&self, initial: F) -> FormController<F> {
        FormController::new(Arc::clone(&self.notifier), initial)
    }

    /// Filter engine persisted under `key`
    pub async fn filters(&self, key: &str) -> CoreResult<FilterEngine> {
        FilterEngine::load(Arc::clone(&self.store), key).await
    }

    pub fn confirmation_gate<T: Clone + Send + 'static>(&self) -> ConfirmationGate<T> {
        ConfirmationGate::new(Arc::clone(&self.notifier))
    }

    pub fn dialog<T>(&self) -> DialogController<T> {
        DialogController::new()
    }
}
