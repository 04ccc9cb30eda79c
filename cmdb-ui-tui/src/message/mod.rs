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
//! src/message/mod.rs
//! Message 层：事件消息定义
//!
//! 作为 Event —→ Update 之间的桥梁。
//! 键盘事件和后台任务的完成都被翻译成 Message，
//! Update 层只根据 Message 来修改 Model。
//!
//!
//! 有模块结构：
//!     src/message/mod.rs
//!         mod app;            // 主消息 AppMessage
//!         mod content;        // 资产列表子消息
//!         mod modal;          // 弹窗子消息（表单 / 确认）
//!         mod search;         // 搜索输入子消息
//!         mod task;           // 后台任务完成消息
//!
//!
//!     在 app::AppMessage 中进行主消息的枚举：
//!
//!         pub enum AppMessage {
//!             Quit,                           // 退出应用
//!             Tick,                           // 定时器，清理过期提示
//!             Content(ContentMessage),        // 列表操作
//!             Modal(ModalMessage),            // 弹窗操作
//!             Search(SearchMessage),          // 搜索输入
//!             Task(TaskMessage),              // 后台任务完成
//!             Noop,                           // 无操作，用于代替 Option::None
//!         }
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 两个来源
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     1. 键盘：src/event/handler.rs 的 handle_event() 返回 AppMessage
//!
//!     2. 后台任务：update 层用 tokio::spawn 执行网络请求，
//!        任务结束时把 TaskMessage 发送到 mpsc 通道：
//!
//!             let tx = app.tx.clone();
//!             tokio::spawn(async move {
//!                 runner.execute(...).await;
//!                 let _ = tx.send(AppMessage::Task(TaskMessage::Loaded));
//!             });
//!
//!        主循环（src/app.rs）每一轮用 try_recv() 取出这些消息，
//!        和键盘消息一样交给 update::update()。
//!
//!     —— 去往 src/update/mod.rs 吧
//!

mod app;
mod content;
mod modal;
mod search;
mod task;

pub use app::AppMessage;
pub use content::ContentMessage;
pub use modal::ModalMessage;
pub use search::SearchMessage;
pub use task::TaskMessage;
