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
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘输入事件转换为 Message。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件处理器
//!         mod keymap;         // 快捷键映射
//!
//!         pub use handler::{handle_event , poll_event};
//!
//!
//!     其中有：
//!         · poll_event      事件轮询，受 ~/app.rs 调用
//!
//!         pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
//!             if event::poll(timeout)? {                  // 此处阻塞以等待事件，最长等待 timeout
//!                 Ok(Some(event::read()?))
//!             } else {
//!                 Ok(None)
//!             }
//!         }
//!
//!
//!         · handle_event    事件分发
//!
//!         按键按以下优先级分发：
//!             0. Ctrl+C                   → AppMessage::Quit（任何状态）
//!             1. 确认弹窗打开              → handle_confirm_keys()
//!             2. 表单弹窗打开              → handle_form_keys()
//!             3. 搜索栏处于输入状态        → handle_search_keys()
//!             4. 其他                      → handle_list_keys()
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 快捷键
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     资产列表（src/event/keymap.rs 的 DefaultKeymap）：
//!         ↑/k ↓/j Home/g End/G    移动选中行
//!         a                       新建资产
//!         e / Enter               编辑
//!         v                       查看（只读）
//!         d                       删除当前行
//!         空格                    标记/取消标记
//!         D                       删除所有标记的行
//!         /                       搜索
//!         f                       切换状态筛选
//!         s                       切换排序
//!         c                       清除筛选
//!         r                       刷新
//!         q                       退出
//!
//!     表单弹窗：
//!         Tab / ↓                 → ModalMessage::NextField
//!         Shift+Tab / ↑           → ModalMessage::PrevField
//!         Enter                   → ModalMessage::Confirm
//!         Esc                     → ModalMessage::Close
//!         字符输入                 → ModalMessage::Input(c)
//!         Backspace               → ModalMessage::Backspace
//!
//!     确认弹窗：
//!         Enter / y               → ModalMessage::Confirm
//!         Esc / n                 → ModalMessage::Close
//!
//!
//!     handler.rs 返回的 AppMessage 在 src/app.rs 中交给
//!         update::update(app, msg).await;
//!     —— 去往 src/update/mod.rs 吧
//!

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
