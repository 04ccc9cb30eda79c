//! 后台任务完成消息
//!
//! 异步操作在 tokio 任务中运行，结束时通过 mpsc 通道发回主循环

use cmdb_ui_core::SubmitOutcome;

/// 后台任务结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskMessage {
    /// 资产列表加载结束（结果已写入 RequestRunner）
    Loaded,
    /// 表单提交结束
    Submitted(SubmitOutcome),
    /// 确认的删除操作结束；`false` 表示失败或未执行
    Deleted(bool),
}
