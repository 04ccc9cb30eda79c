//! 弹窗消息类型

/// 弹窗相关消息
///
/// 确认弹窗打开时只响应 `Close` 和 `Confirm`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMessage {
    /// 关闭弹窗
    Close,

    /// 下一个输入字段
    NextField,

    /// 上一个输入字段
    PrevField,

    /// 确认/提交
    Confirm,

    /// 输入字符
    Input(char),

    /// 删除字符（Backspace）
    Backspace,
}
