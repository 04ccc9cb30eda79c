//! 主消息类型

use super::{ContentMessage, ModalMessage, SearchMessage, TaskMessage};

/// 应用主消息
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 定时器（清理过期提示）
    Tick,

    /// 资产列表子消息
    Content(ContentMessage),

    /// 弹窗子消息（表单弹窗与确认弹窗）
    Modal(ModalMessage),

    /// 搜索输入子消息
    Search(SearchMessage),

    /// 后台任务完成
    Task(TaskMessage),

    /// 无操作
    Noop,
}
