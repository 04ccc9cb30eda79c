//! CMDB UI TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 资产数据来源与配置 (`backend/`)
//!
//! 控制器（请求、表单、筛选、弹窗、确认）来自 `cmdb-ui-core`，
//! 本 crate 只负责把它们组合成资产页面并绘制到终端。
//!
//!
//! main.rs
//! 程序入口
//!
//! 其执行：
//! async fn `main()` {
//!
//!     LocalConfigService::load_or_default()   // 读取 config.json，缺失时写入默认配置
//!     init_logging()                          // 日志写入配置目录
//!     build_backend()                         // 配置了 apiBaseUrl 时使用 HTTP，否则使用演示数据
//!     ctx.filters()                           // 恢复上次保存的筛选条件
//!     App::new()                              // 创建 APP 实例
//!     update::spawn_load()                    // 首次加载资产列表
//!     init_terminal()                         // 初始化终端
//!     app::run()                              // 运行 app.rs 主循环
//!     restore_terminal()                      // 无论成功与否，都恢复终端
//!
//! }

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use cmdb_ui_core::http::ApiClient;
use cmdb_ui_core::{FilterEngine, UiContext};
use tokio::sync::mpsc;

use backend::config_service::{config_dir, log_file, state_file};
use backend::{
    AppConfig, AssetBackend, ConfigService, HttpAssetBackend, InMemoryAssetBackend, JsonFileStore,
    LocalConfigService,
};
use model::ToastQueue;
use util::{init_logging, init_terminal, restore_terminal};

/// 演示数据的模拟网络延迟
const DEMO_LATENCY: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> Result<()> {
    let dir = config_dir();

    // 1. 读取配置
    let config_service = LocalConfigService::new(&dir);
    let config = config_service.load_or_default();
    if !config_service.path().exists() {
        if let Err(e) = config_service.save(&config) {
            eprintln!("{e}");
        }
    }

    // 2. 初始化日志（失败不影响运行）
    if let Err(e) = init_logging(&log_file(&dir), &config.log_level) {
        eprintln!("{e:#}");
    }
    view::theme::set_theme(config.theme);

    // 3. 组装控制器上下文
    let backend = build_backend(&config)?;
    tracing::info!("Starting CMDB UI TUI with {}", backend.name());

    let toasts = Arc::new(ToastQueue::new(config.toast_duration()));
    let store = Arc::new(JsonFileStore::new(state_file(&dir)));
    let ctx = UiContext::new(toasts.clone(), store);
    let filters = match ctx.filters(&config.filter_storage_key).await {
        Ok(filters) => filters,
        Err(e) => {
            tracing::warn!("Saved filters ignored: {e}");
            FilterEngine::new()
        }
    };

    // 4. 创建应用实例并开始首次加载
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = model::App::new(&ctx, toasts, backend, filters, tx);
    update::spawn_load(&app);

    // 5. 运行主循环
    let mut terminal = init_terminal()?;
    let result = app::run(&mut terminal, &mut app, &mut rx).await;

    // 6. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    result
}

/// 根据配置选择数据来源
fn build_backend(config: &AppConfig) -> Result<Arc<dyn AssetBackend>> {
    match config.api_base_url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            let mut client = ApiClient::new(url, config.request_timeout())?;
            if let Some(token) = &config.api_token {
                client = client.with_token(token.clone());
            }
            Ok(Arc::new(HttpAssetBackend::new(client)))
        }
        _ => Ok(Arc::new(
            InMemoryAssetBackend::with_demo_data().with_latency(DEMO_LATENCY),
        )),
    }
}
