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
//! src/backend/mod.rs
//! Backend 层：数据访问
//!
//! Backend 层与 UI 完全解耦，负责资产数据的读写与本地持久化。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod asset_backend;              // AssetBackend trait
//!         mod http_asset_backend;         // CMDB REST API（ApiClient）
//!         mod in_memory_asset_backend;    // 内存演示数据
//!         mod json_file_store;            // 筛选状态持久化（JSON 文件）
//!         pub mod config_service;         // 配置文件
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、资产后端（AssetBackend）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     main.rs 根据配置选择实现：
//!         - 配置了 apiBaseUrl      → HttpAssetBackend
//!         - 未配置                 → InMemoryAssetBackend（带演示数据）
//!
//!     两种实现都以 CoreError 报告失败；字段级校验错误为
//!     CoreError::Validation，由 FormController 映射到表单字段。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、键值存储（JsonFileStore）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     实现 cmdb-ui-core 的 KeyValueStore trait。
//!     存储位置：~/.config/cmdb-ui-tui/state.json
//!
//!     FilterEngine 的每次修改都会立即写入。
//!

mod asset_backend;
mod http_asset_backend;
mod in_memory_asset_backend;
mod json_file_store;

pub mod config_service;

pub use asset_backend::AssetBackend;
pub use config_service::{AppConfig, ConfigService, LocalConfigService};
pub use http_asset_backend::HttpAssetBackend;
pub use in_memory_asset_backend::InMemoryAssetBackend;
pub use json_file_store::JsonFileStore;
