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
//! src/model/mod.rs
//! Model 层：应用状态定义
//!
//! Model 层是应用状态的 “唯一真相来源”。
//! 状态本身由 cmdb-ui-core 的控制器持有，这一层负责把它们组合起来。
//! 所有状态变更都通过 Update 层来触发。
//!
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // 主应用状态
//!
//!         pub mod domain;     // 领域模型（资产、资产表单）
//!         pub mod state;      // 页面数据状态（资产页面、提示消息）
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、主应用状态（App）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/model/app.rs 中定义：
//!
//!         pub struct App {
//!             pub should_quit: bool,                  // 退出标志
//!             pub assets: AssetsState,                // 资产页面状态
//!             pub toasts: Arc<ToastQueue>,            // 提示消息
//!             pub backend: Arc<dyn AssetBackend>,     // 数据来源
//!             pub tx: UnboundedSender<AppMessage>,    // 后台任务回传通道
//!         }
//!
//!     使用：
//!         - 在 main.rs 中创建：App::new(&ctx, toasts, backend, filters, tx)
//!         - 在 update/mod.rs 中修改：app.should_quit = true;
//!         - 在 view/mod.rs 中读取：pub fn render(app: &App, ...)
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、资产页面状态（AssetsState）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/model/state/assets.rs 中定义，由控制器组合而成：
//!
//!         runner:  RequestRunner<Vec<Asset>>      // 列表加载：loading / error / data
//!         filters: FilterEngine                   // 筛选、搜索、排序（持久化）
//!         dialog:  DialogController<Asset>        // 弹窗：Closed / Open { Create | Edit | View }
//!         form:    FormController<AssetForm>      // 表单值、字段错误、提交状态
//!         confirm: ConfirmationGate<Asset>        // 删除确认
//!
//!     以及页面自身的状态：
//!         selected      当前选中行
//!         marked        批量操作标记的 id
//!         form_focus    表单焦点字段
//!         search        搜索栏输入状态
//!
//!     控制器可以廉价克隆（共享内部状态），
//!     所以 update 层把克隆交给 tokio::spawn 的任务，视图读取的仍是同一份状态。
//!
//!     数据流（以加载为例）：
//!         用户按 r
//!             ↓
//!         event/handler.rs 返回 Content(Refresh)
//!             ↓
//!         update 层 spawn：runner.execute(backend.list(...))
//!             ↓                          （loading = true，表格显示 Loading...）
//!         任务结束，发送 Task(Loaded)
//!             ↓
//!         update 层修正选中项，view 层渲染 runner.data()
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 三、提示消息（ToastQueue）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/model/state/toasts.rs 中定义，实现 Notifier trait。
//!     控制器的成功/失败通知进入队列，主循环的 Tick 清理过期消息。
//!

mod app;
pub mod domain;
pub mod state;

pub use app::App;
pub use state::{AssetsState, Toast, ToastQueue};
