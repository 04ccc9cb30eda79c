//! 
//! app.rs
//! 应用主循环
//! 
//! 
//! 
//! 在应用启动时（main.rs），创建以下状态：
//! 
//! App {
//! 
//!     should_quit: bool = false,                      // 决定应用是否应该退出
//!     assets: AssetsState {                           // 资产页面，由 core 的控制器组合
//!         runner, filters, dialog, form, confirm,
//!         selected = 0,                                   // 当前选中第几行
//!         marked = {},                                    // 批量操作的标记
//!         search = None,                                  // 搜索栏是否在输入
//!     },
//!     toasts: Arc<ToastQueue>,                        // 提示消息，也是控制器的 Notifier
//!     backend: Arc<dyn AssetBackend>,                 // HTTP 或内存演示数据
//!     tx: UnboundedSender<AppMessage>,                // 后台任务完成时回传消息
//! 
//! }
//! 
//! 
//! 主循环大约每 100 ms 执行一次（取决于有无事件）
//! 应用的主循环中有：
//! loop {
//! 
//!     terminal.draw(|f| view::render(&app , f))       // 渲染 UI
//!     if app.should_quit{ break }                     // 检查 APP 是否应该退出
//!     while let Ok(msg) = rx.try_recv() {             // 处理后台任务回传的消息
//!         update::update(&mut app , msg).await
//!     }
//!     update::update(&mut app , Tick).await           // 清理过期的提示消息
//!     if let Some(event) = poll_event() {             // 轮询获取输入，在此等待 100ms
//!         let msg = handle_event(event , &app);           // 接收原始事件并分发消息
//!         update::update(&mut app , msg).await            // 更新状态
//!     }
//! }

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

/// 运行应用主循环
pub async fn run(
    terminal: &mut Term,
    app: &mut App,
    rx: &mut UnboundedReceiver<AppMessage>,
) -> Result<()> {
    loop {
        // 1. 渲染 UI
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 2. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 3. 后台任务的结果
        while let Ok(msg) = rx.try_recv() {
            update::update(app, msg).await;
        }
        update::update(app, AppMessage::Tick).await;

        // 4. 轮询事件（100ms 超时）
        if let Some(event) = event::poll_event(Duration::from_millis(100))? {
            // 5. 处理事件，获取消息
            let msg = event::handle_event(event, app);

            // 6. 更新状态
            update::update(app, msg).await;
        }
    }

    tracing::info!("Main loop finished");
    Ok(())
}
