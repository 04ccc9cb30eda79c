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
//! src/util/mod.rs
//! Util 层：基础设施和工具函数
//!
//! Util 层提供与业务逻辑无关的基础设施代码：
//! 终端的初始化和恢复，以及日志文件的初始化。
//!
//!
//! 有模块结构：
//!     src/util/mod.rs
//!         mod terminal;       // 终端初始化和恢复
//!         mod logging;        // 日志写入文件
//!
//!         pub use terminal::{init_terminal, restore_terminal, Term};
//!         pub use logging::init_logging;
//!
//!
//!     终端类型定义：
//!         在 src/util/terminal.rs 中，有：
//!
//!             pub type Term = Terminal<CrosstermBackend<Stdout>>;
//!
//!
//!     初始化终端：
//!
//!         · Raw Mode（原始模式）
//!             - 关闭行缓冲：无需按 Enter，每个按键立即生效
//!             - 关闭字符回显：按键不会显示在终端上
//!             - 捕获所有按键：包括 Ctrl+C、箭头键等特殊键
//!
//!         · Alternate Screen（备用屏幕）
//!             - TUI 应用在备用屏幕运行
//!             - 退出后自动恢复主屏幕内容
//!
//!
//!     恢复终端：
//!         restore_terminal() 关闭原始模式、离开备用屏幕并显示光标。
//!
//!         注意：无论主循环正常退出还是返回错误，都必须调用此函数！
//!               否则终端会保持在原始模式，用户输入不会正常显示。
//!
//!
//!     日志：
//!         终端处于备用屏幕时不能向 stdout / stderr 输出日志，
//!         因此 init_logging() 把日志写入配置目录下的 cmdb-ui-tui.log。
//!         级别取 RUST_LOG，未设置时取配置文件中的 logLevel。
//!
//!
//! Util 层在应用启动时初始化，在应用退出时恢复终端。
//!     —— 去往 src/app.rs 主循环吧
//!

mod logging;
mod terminal;

pub use logging::init_logging;
pub use terminal::{init_terminal, restore_terminal, Term};
