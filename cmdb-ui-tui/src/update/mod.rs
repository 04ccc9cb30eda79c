//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                                │
//！│                                                                             │
//！│  ┌────────────────────────────── UI 层 ────────────────────────────────┐    │
//！│  │                                                                      │    │
//！│  │   ┌─────────┐          ┌────────────┐          ┌──────────┐          │    │
//！│  │   │  Event  │ ───────▶ │  Message   │ ───────▶ │  Update  │          │    │
//！│  │   │   层    │   翻译    │    层      │   消费    │    层    │          │    │
//！│  │   └─────────┘          │            │          └────┬─────┘          │    │
//！│  │        ▲               │ AppMessage │               │ 修改           │    │
//！│  │        │               │ ContentMsg │               ▼                │    │
//！│  │   ┌─────────┐          │ ModalMsg   │          ┌──────────┐          │    │
//！│  │   │  View   │          │ TaskMsg    │   ┌───── │  Model   │          │    │
//！│  │   │   层    │          └────────────┘   │      │ (控制器)  │          │    │
//！│  │   └────┬────┘ ◀──────── 读取 ───────────┘      └────┬─────┘          │    │
//！│  │        │                                            │                │    │
//！│  └────────│────────────────────────────────────────────│────────────────┘    │
//！│           │                                            │ tokio::spawn        │
//！│           ▼                                            ▼                     │
//！│      ┌─────────┐                                 ┌──────────┐  TaskMessage   │
//！│      │  终端   │                                 │ Backend  │ ──▶ mpsc ──▶ 主循环│
//！│      │ (Util)  │                                 │    层    │                │
//！│      └─────────┘                                 └────┬─────┘                │
//！│                                                       ▼                      │
//！│                                            ┌───────────────────┐             │
//！│                                            │   cmdb-ui-core    │             │
//！│                                            └───────────────────┘             │
//！└─────────────────────────────────────────────────────────────────────────────┘

//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态。
//! 是唯一可以修改 Model 的地方。
//!
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod content;        // 资产列表子消息处理
//!         mod modal;          // 弹窗子消息处理（表单 / 确认）
//!         mod search;         // 搜索输入处理
//!         mod task;           // 后台任务完成处理
//!
//!         pub async fn update(app: &mut App, msg: AppMessage) {...}
//!
//!
//!     update 是 async 的：筛选条件的修改会写入 KeyValueStore，
//!     在这里直接 .await（本地文件，很快）。
//!
//!     网络请求则不在这里等待，而是交给 tokio::spawn：
//!
//!         spawn_load(app)
//!             ↓  克隆 runner、backend、tx
//!         tokio::spawn(async move {
//!             runner.execute(...).await;      // 结果写入 runner 的状态
//!             tx.send(Task(Loaded));          // 通知主循环
//!         });
//!
//!     主循环收到 TaskMessage 后再次调用 update，由 task.rs 处理后续：
//!         - Loaded                → 修正选中项、清理失效标记
//!         - Submitted(Succeeded)  → 关闭弹窗并重新加载
//!         - Submitted(Invalid)    → 焦点移到第一个出错的字段
//!         - Deleted(true)         → 清除标记并重新加载
//!
//!
//! Update 完成后，控制权返回主循环（app.rs）。
//! 下一轮循环时，View 层会读取更新后的 Model 来重新渲染。
//!

mod content;
mod modal;
mod search;
mod task;

use std::sync::Arc;
use std::time::Instant;

use cmdb_ui_core::types::Severity;
use cmdb_ui_core::{CoreResult, ExecuteOptions, Notifier};

use crate::message::{AppMessage, TaskMessage};
use crate::model::App;

/// 处理应用消息，更新状态
pub async fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::Tick => {
            app.toasts.prune(Instant::now());
        }

        AppMessage::Content(content_msg) => {
            content::update(app, content_msg).await;
        }

        AppMessage::Modal(modal_msg) => {
            modal::update(app, modal_msg);
        }

        AppMessage::Search(search_msg) => {
            search::update(app, search_msg).await;
        }

        AppMessage::Task(task_msg) => {
            task::update(app, task_msg);
        }

        AppMessage::Noop => {}
    }
}

/// 在后台重新加载资产列表
pub fn spawn_load(app: &App) {
    let runner = app.assets.runner.clone();
    let backend = Arc::clone(&app.backend);
    let params = app.assets.filters.get_api_params();
    let tx = app.tx.clone();

    tokio::spawn(async move {
        runner
            .execute(
                move || async move { backend.list(&params).await },
                ExecuteOptions::new().context("Failed to load assets"),
            )
            .await;
        // 接收端只在退出时关闭
        let _ = tx.send(AppMessage::Task(TaskMessage::Loaded));
    });
}

/// 筛选条件已生效但未能保存时提示
fn report_persistence(app: &App, result: CoreResult<()>) {
    if let Err(e) = result {
        app.toasts
            .display(Severity::Warn, &format!("Filters not saved: {e}"));
    }
}
