//! 快捷键配置
//!
//! 定义资产页面的快捷键映射

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 快捷键绑定
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// 检查按键事件是否匹配此快捷键绑定
    ///
    /// 字符键的大小写已经体现在字符本身，忽略 Shift
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        modifiers == self.modifiers && key.code == self.code
    }
}

/// 默认快捷键配置
pub struct DefaultKeymap;

impl DefaultKeymap {
    // 全局
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));

    // 操作
    pub const ACTION_ADD: KeyBinding = KeyBinding::key(KeyCode::Char('a'));
    pub const ACTION_EDIT: KeyBinding = KeyBinding::key(KeyCode::Char('e'));
    pub const ACTION_VIEW: KeyBinding = KeyBinding::key(KeyCode::Char('v'));
    pub const ACTION_DELETE: KeyBinding = KeyBinding::key(KeyCode::Char('d'));
    pub const ACTION_BULK_DELETE: KeyBinding = KeyBinding::key(KeyCode::Char('D'));
    pub const ACTION_MARK: KeyBinding = KeyBinding::key(KeyCode::Char(' '));
    pub const ACTION_REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('r'));

    // 筛选
    pub const SEARCH: KeyBinding = KeyBinding::key(KeyCode::Char('/'));
    pub const FILTER_STATUS: KeyBinding = KeyBinding::key(KeyCode::Char('f'));
    pub const SORT: KeyBinding = KeyBinding::key(KeyCode::Char('s'));
    pub const CLEAR_FILTERS: KeyBinding = KeyBinding::key(KeyCode::Char('c'));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_characters_match_without_shift_binding() {
        let key = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert!(DefaultKeymap::ACTION_BULK_DELETE.matches(&key));
        assert!(!DefaultKeymap::ACTION_DELETE.matches(&key));
    }

    #[test]
    fn ctrl_c_is_not_a_plain_c() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(DefaultKeymap::FORCE_QUIT.matches(&key));
        assert!(!DefaultKeymap::CLEAR_FILTERS.matches(&key));
    }
}
