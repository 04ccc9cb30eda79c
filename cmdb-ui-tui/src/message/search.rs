//! 搜索输入消息

/// 搜索栏消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMessage {
    /// 输入字符
    Input(char),
    /// 删除字符
    Backspace,
    /// 应用搜索（Enter）
    Apply,
    /// 放弃输入，恢复之前的搜索（Esc）
    Cancel,
}
