//! 弹窗更新逻辑
//!
//! 确认弹窗打开时，按键只作用于确认弹窗

use std::sync::Arc;

use cmdb_ui_core::SubmitOptions;

use crate::message::{AppMessage, ModalMessage, TaskMessage};
use crate::model::App;

/// 处理弹窗消息
pub fn update(app: &mut App, msg: ModalMessage) {
    if app.assets.confirm.is_visible() {
        handle_confirm_dialog(app, &msg);
    } else if app.assets.dialog.is_visible() {
        handle_form_dialog(app, msg);
    }
}

// ========== 确认弹窗 ==========

fn handle_confirm_dialog(app: &App, msg: &ModalMessage) {
    let gate = &app.assets.confirm;
    // 执行中不可取消也不可重复确认
    if gate.is_executing() {
        return;
    }

    match msg {
        ModalMessage::Close => gate.close_confirm_dialog(),
        ModalMessage::Confirm => {
            let gate = gate.clone();
            let tx = app.tx.clone();
            tokio::spawn(async move {
                let succeeded = gate.execute_confirmed_action().await;
                let _ = tx.send(AppMessage::Task(TaskMessage::Deleted(succeeded)));
            });
        }
        _ => {}
    }
}

// ========== 表单弹窗 ==========

fn handle_form_dialog(app: &mut App, msg: ModalMessage) {
    let read_only = app.assets.dialog.is_read_only();

    match msg {
        ModalMessage::Close => {
            if app.assets.form.is_submitting() {
                return;
            }
            app.assets.dialog.close();
        }
        ModalMessage::NextField => app.assets.focus_next_field(),
        ModalMessage::PrevField => app.assets.focus_prev_field(),
        ModalMessage::Input(c) if !read_only => {
            let field = app.assets.focused_field();
            app.assets
                .form
                .set_field(field.key(), |form| form.value_mut(field).push(c));
        }
        ModalMessage::Backspace if !read_only => {
            let field = app.assets.focused_field();
            app.assets.form.set_field(field.key(), |form| {
                form.value_mut(field).pop();
            });
        }
        ModalMessage::Confirm if read_only => app.assets.dialog.close(),
        ModalMessage::Confirm => spawn_submit(app),
        ModalMessage::Input(_) | ModalMessage::Backspace => {}
    }
}

/// 在后台提交表单：编辑时更新，新建时创建
fn spawn_submit(app: &App) {
    let form = app.assets.form.clone();
    let backend = Arc::clone(&app.backend);
    let editing_id = app.assets.dialog.payload().map(|asset| asset.id.clone());
    let tx = app.tx.clone();

    tokio::spawn(async move {
        let outcome = form
            .submit(
                move |values| async move {
                    match editing_id {
                        Some(id) => backend.update(&id, values).await.map(|_| ()),
                        None => backend.create(values).await.map(|_| ()),
                    }
                },
                SubmitOptions::new()
                    .success("Asset saved")
                    .context("Failed to save asset"),
            )
            .await;
        let _ = tx.send(AppMessage::Task(TaskMessage::Submitted(outcome)));
    });
}

#[cfg(test)]
mod tests {
    use cmdb_ui_core::types::Severity;
    use cmdb_ui_core::SubmitOutcome;

    use super::*;
    use crate::backend::AssetBackend;
    use crate::message::ContentMessage;
    use crate::model::domain::FormField;
    use crate::test_utils::{create_test_app, TestApp};
    use crate::update::update as dispatch;

    async fn loaded_app() -> TestApp {
        let mut t = create_test_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::Refresh)).await;
        let msg = t.next_message().await;
        dispatch(&mut t.app, msg).await;
        t
    }

    async fn send(t: &mut TestApp, msg: ModalMessage) {
        dispatch(&mut t.app, AppMessage::Modal(msg)).await;
    }

    async fn type_text(t: &mut TestApp, text: &str) {
        for c in text.chars() {
            send(t, ModalMessage::Input(c)).await;
        }
    }

    /// 处理后台消息直到列表重新加载完成
    async fn settle(t: &mut TestApp) {
        loop {
            let msg = t.next_message().await;
            let loaded = matches!(msg, AppMessage::Task(TaskMessage::Loaded));
            dispatch(&mut t.app, msg).await;
            if loaded {
                break;
            }
        }
    }

    #[tokio::test]
    async fn empty_create_form_focuses_the_first_missing_field() {
        let mut t = loaded_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::Add)).await;
        send(&mut t, ModalMessage::NextField).await;
        send(&mut t, ModalMessage::Confirm).await;

        let msg = t.next_message().await;
        assert!(matches!(
            msg,
            AppMessage::Task(TaskMessage::Submitted(SubmitOutcome::Invalid))
        ));
        dispatch(&mut t.app, msg).await;

        let errors = t.app.assets.form.errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(t.app.assets.focused_field(), FormField::Name);
        assert!(t.app.assets.dialog.is_visible());
    }

    #[tokio::test]
    async fn typing_clears_the_field_error() {
        let mut t = loaded_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::Add)).await;
        t.app.assets.form.set_field_error("name", "required");

        type_text(&mut t, "Pump").await;

        assert_eq!(t.app.assets.form.form().name, "Pump");
        assert_eq!(t.app.assets.form.state().error("name"), None);
    }

    #[tokio::test]
    async fn successful_create_closes_the_dialog_and_reloads() {
        let mut t = loaded_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::Add)).await;

        type_text(&mut t, "Pump 7").await;
        for field in [FormField::AssetType, FormField::Site] {
            while t.app.assets.focused_field() != field {
                send(&mut t, ModalMessage::NextField).await;
            }
            type_text(&mut t, if field == FormField::Site { "Plant C" } else { "Pump" }).await;
        }
        send(&mut t, ModalMessage::Confirm).await;
        settle(&mut t).await;

        assert!(!t.app.assets.dialog.is_visible());
        assert_eq!(t.app.assets.visible().len(), 7);
        assert!(t
            .toasts
            .active()
            .iter()
            .any(|toast| toast.severity == Severity::Success && toast.message == "Asset saved"));
    }

    #[tokio::test]
    async fn server_side_errors_stay_in_the_form() {
        let mut t = loaded_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::SelectNext)).await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::Edit)).await;

        // PLC Line 2 -> 使用 PLC Line 1 的标签
        t.app.assets.focus_next_field();
        send(&mut t, ModalMessage::Backspace).await;
        type_text(&mut t, "1").await;
        send(&mut t, ModalMessage::Confirm).await;

        let msg = t.next_message().await;
        dispatch(&mut t.app, msg).await;

        assert_eq!(t.app.assets.form.state().error("tag"), Some("tag already in use"));
        assert_eq!(t.app.assets.focused_field(), FormField::Tag);
        assert!(t.app.assets.dialog.is_visible());
    }

    #[tokio::test]
    async fn view_mode_is_read_only() {
        let mut t = loaded_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::View)).await;

        type_text(&mut t, "xyz").await;
        assert_eq!(t.app.assets.form.form().name, "PLC Line 1");

        send(&mut t, ModalMessage::Confirm).await;
        assert!(!t.app.assets.dialog.is_visible());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_row() {
        let mut t = loaded_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::Delete)).await;
        send(&mut t, ModalMessage::Confirm).await;

        let msg = t.next_message().await;
        assert!(matches!(msg, AppMessage::Task(TaskMessage::Deleted(true))));
        dispatch(&mut t.app, msg).await;
        settle(&mut t).await;

        assert!(!t.app.assets.confirm.is_visible());
        assert_eq!(t.app.assets.visible().len(), 5);
        assert_eq!(
            t.last_toast(),
            Some((Severity::Success, "\"PLC Line 1\" deleted".to_string()))
        );
    }

    #[tokio::test]
    async fn bulk_delete_runs_once_for_all_marked_rows() {
        let mut t = loaded_app().await;
        for msg in [
            ContentMessage::ToggleMark,
            ContentMessage::SelectNext,
            ContentMessage::ToggleMark,
            ContentMessage::BulkDelete,
        ] {
            dispatch(&mut t.app, AppMessage::Content(msg)).await;
        }
        let prompt = t.app.assets.confirm.prompt().unwrap();
        assert!(prompt.is_bulk);
        assert_eq!(prompt.targets.len(), 2);

        send(&mut t, ModalMessage::Confirm).await;
        let msg = t.next_message().await;
        dispatch(&mut t.app, msg).await;
        settle(&mut t).await;

        assert!(t.app.assets.marked.is_empty());
        assert_eq!(t.app.assets.visible().len(), 4);
    }

    #[tokio::test]
    async fn partially_failed_bulk_delete_still_reloads() {
        let mut t = loaded_app().await;
        for msg in [
            ContentMessage::ToggleMark,
            ContentMessage::SelectNext,
            ContentMessage::ToggleMark,
        ] {
            dispatch(&mut t.app, AppMessage::Content(msg)).await;
        }
        // 另一个客户端先删掉了 demo-1
        t.app.backend.delete("demo-1").await.unwrap();

        dispatch(&mut t.app, AppMessage::Content(ContentMessage::BulkDelete)).await;
        send(&mut t, ModalMessage::Confirm).await;
        let msg = t.next_message().await;
        assert!(matches!(msg, AppMessage::Task(TaskMessage::Deleted(false))));
        dispatch(&mut t.app, msg).await;
        settle(&mut t).await;

        let ids: Vec<_> = t.app.assets.visible().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids.len(), 4);
        assert!(!ids.iter().any(|id| id == "demo-1" || id == "demo-2"));
        assert!(t.app.assets.marked.is_empty());
        assert_eq!(t.last_toast().map(|(severity, _)| severity), Some(Severity::Error));
    }

    #[tokio::test]
    async fn cancelled_confirmation_does_nothing() {
        let mut t = loaded_app().await;
        dispatch(&mut t.app, AppMessage::Content(ContentMessage::Delete)).await;
        send(&mut t, ModalMessage::Close).await;

        assert!(!t.app.assets.confirm.is_visible());
        assert!(t.rx.try_recv().is_err());
        assert_eq!(t.app.assets.visible().len(), 6);
    }
}
