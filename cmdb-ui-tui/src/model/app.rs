//! 应用主状态结构

use std::sync::Arc;

use cmdb_ui_core::controllers::FilterEngine;
use cmdb_ui_core::UiContext;
use tokio::sync::mpsc::UnboundedSender;

use super::{AssetsState, ToastQueue};
use crate::backend::AssetBackend;
use crate::message::AppMessage;

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 资产页面状态
    pub assets: AssetsState,

    /// 提示消息（同时也是控制器的 Notifier）
    pub toasts: Arc<ToastQueue>,

    /// 资产数据来源
    pub backend: Arc<dyn AssetBackend>,

    /// 后台任务完成时向主循环发送消息
    pub tx: UnboundedSender<AppMessage>,
}

impl App {
    /// 创建新的应用实例
    pub fn new(
        ctx: &UiContext,
        toasts: Arc<ToastQueue>,
        backend: Arc<dyn AssetBackend>,
        filters: FilterEngine,
        tx: UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            should_quit: false,
            assets: AssetsState::new(ctx, filters),
            toasts,
            backend,
            tx,
        }
    }

    /// 标题栏显示的数据来源名称
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}
