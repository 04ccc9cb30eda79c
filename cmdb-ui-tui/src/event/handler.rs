//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ContentMessage, ModalMessage, SearchMessage};
use crate::model::App;

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // 终端窗口大小改变，下一轮自动重绘
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press 事件，忽略 Release 和 Repeat
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    // Ctrl+C 在任何状态下都退出
    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    let assets = &app.assets;
    if assets.confirm.is_visible() {
        return handle_confirm_keys(key);
    }
    if assets.dialog.is_visible() {
        return handle_form_keys(key);
    }
    if assets.search.is_some() {
        return handle_search_keys(key);
    }
    handle_list_keys(key)
}

/// 确认弹窗：只有确认和取消
fn handle_confirm_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') => AppMessage::Modal(ModalMessage::Confirm),
        KeyCode::Esc | KeyCode::Char('n') => AppMessage::Modal(ModalMessage::Close),
        _ => AppMessage::Noop,
    }
}

/// 表单弹窗
fn handle_form_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Esc => AppMessage::Modal(ModalMessage::Close),
        KeyCode::Tab | KeyCode::Down => AppMessage::Modal(ModalMessage::NextField),
        KeyCode::BackTab | KeyCode::Up => AppMessage::Modal(ModalMessage::PrevField),
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),
        KeyCode::Backspace => AppMessage::Modal(ModalMessage::Backspace),
        KeyCode::Char(c) if !has_command_modifier(&key) => AppMessage::Modal(ModalMessage::Input(c)),
        _ => AppMessage::Noop,
    }
}

/// 搜索栏
fn handle_search_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Esc => AppMessage::Search(SearchMessage::Cancel),
        KeyCode::Enter => AppMessage::Search(SearchMessage::Apply),
        KeyCode::Backspace => AppMessage::Search(SearchMessage::Backspace),
        KeyCode::Char(c) if !has_command_modifier(&key) => AppMessage::Search(SearchMessage::Input(c)),
        _ => AppMessage::Noop,
    }
}

/// 资产列表
fn handle_list_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    let bindings = [
        (DefaultKeymap::ACTION_ADD, ContentMessage::Add),
        (DefaultKeymap::ACTION_EDIT, ContentMessage::Edit),
        (DefaultKeymap::ACTION_VIEW, ContentMessage::View),
        (DefaultKeymap::ACTION_DELETE, ContentMessage::Delete),
        (DefaultKeymap::ACTION_BULK_DELETE, ContentMessage::BulkDelete),
        (DefaultKeymap::ACTION_MARK, ContentMessage::ToggleMark),
        (DefaultKeymap::ACTION_REFRESH, ContentMessage::Refresh),
        (DefaultKeymap::SEARCH, ContentMessage::StartSearch),
        (DefaultKeymap::FILTER_STATUS, ContentMessage::CycleStatusFilter),
        (DefaultKeymap::SORT, ContentMessage::CycleSort),
        (DefaultKeymap::CLEAR_FILTERS, ContentMessage::ClearFilters),
    ];
    if let Some((_, msg)) = bindings.iter().find(|(binding, _)| binding.matches(&key)) {
        return AppMessage::Content(*msg);
    }

    match key.code {
        // ↑ 或 k: 上移
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Content(ContentMessage::SelectPrevious),
        // ↓ 或 j: 下移
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Content(ContentMessage::SelectNext),
        KeyCode::Home | KeyCode::Char('g') => AppMessage::Content(ContentMessage::SelectFirst),
        KeyCode::End | KeyCode::Char('G') => AppMessage::Content(ContentMessage::SelectLast),
        // Enter: 编辑
        KeyCode::Enter => AppMessage::Content(ContentMessage::Edit),
        _ => AppMessage::Noop,
    }
}

/// Ctrl / Alt 组合键不作为文本输入
fn has_command_modifier(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_app;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn list_keys_map_to_content_messages() {
        let t = create_test_app().await;

        assert!(matches!(
            handle_event(press(KeyCode::Char('/')), &t.app),
            AppMessage::Content(ContentMessage::StartSearch)
        ));
        assert!(matches!(
            handle_event(press(KeyCode::Enter), &t.app),
            AppMessage::Content(ContentMessage::Edit)
        ));
        assert!(matches!(handle_event(press(KeyCode::Char('q')), &t.app), AppMessage::Quit));
    }

    #[tokio::test]
    async fn open_dialog_captures_text_input() {
        let mut t = create_test_app().await;
        t.app.assets.dialog.open_create("New asset").unwrap();

        assert!(matches!(
            handle_event(press(KeyCode::Char('q')), &t.app),
            AppMessage::Modal(ModalMessage::Input('q'))
        ));
        assert!(matches!(
            handle_event(press(KeyCode::BackTab), &t.app),
            AppMessage::Modal(ModalMessage::PrevField)
        ));
    }

    #[tokio::test]
    async fn confirmation_takes_precedence_over_the_dialog() {
        let mut t = create_test_app().await;
        t.app.assets.dialog.open_create("New asset").unwrap();
        t.app
            .assets
            .confirm
            .confirm_bulk_action(vec![Default::default()], "delete", |_| async { Ok(()) })
            .unwrap();

        assert!(matches!(
            handle_event(press(KeyCode::Char('x')), &t.app),
            AppMessage::Noop
        ));
        assert!(matches!(
            handle_event(press(KeyCode::Esc), &t.app),
            AppMessage::Modal(ModalMessage::Close)
        ));
    }

    #[tokio::test]
    async fn search_mode_routes_keys_to_the_search_bar() {
        let mut t = create_test_app().await;
        t.app.assets.start_search();

        assert!(matches!(
            handle_event(press(KeyCode::Char('s')), &t.app),
            AppMessage::Search(SearchMessage::Input('s'))
        ));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(handle_event(ctrl_c, &t.app), AppMessage::Quit));
    }
}
