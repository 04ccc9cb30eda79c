//! 内容面板更新逻辑
//!
//! 处理资产列表中的各种操作消息

use std::sync::Arc;

use cmdb_ui_core::types::{FilterCriterion, Severity, SortSpec};
use cmdb_ui_core::{CoreError, Notifier};
use serde_json::Value;

use super::{report_persistence, spawn_load};
use crate::message::ContentMessage;
use crate::model::domain::{Asset, AssetForm, ASSET_STATUSES};
use crate::model::App;

/// 排序循环：无排序 → 名称升序 → 名称降序 → 站点 → 状态 → 无排序
fn sort_cycle() -> [Option<SortSpec>; 5] {
    [
        None,
        Some(SortSpec::asc("name")),
        Some(SortSpec::desc("name")),
        Some(SortSpec::asc("site")),
        Some(SortSpec::asc("status")),
    ]
}

/// 处理内容面板消息
pub async fn update(app: &mut App, msg: ContentMessage) {
    match msg {
        // ========== 列表导航 ==========
        ContentMessage::SelectPrevious => app.assets.select_previous(),
        ContentMessage::SelectNext => app.assets.select_next(),
        ContentMessage::SelectFirst => app.assets.select_first(),
        ContentMessage::SelectLast => app.assets.select_last(),
        ContentMessage::ToggleMark => app.assets.toggle_mark(),

        // ========== CRUD 操作 ==========
        ContentMessage::Add => handle_add(app),
        ContentMessage::Edit => handle_edit(app),
        ContentMessage::View => handle_view(app),
        ContentMessage::Delete => handle_delete(app),
        ContentMessage::BulkDelete => handle_bulk_delete(app),
        ContentMessage::Refresh => spawn_load(app),

        // ========== 筛选 ==========
        ContentMessage::StartSearch => app.assets.start_search(),
        ContentMessage::CycleStatusFilter => handle_cycle_status(app).await,
        ContentMessage::CycleSort => handle_cycle_sort(app).await,
        ContentMessage::ClearFilters => {
            let result = app.assets.filters.clear_all().await;
            report_persistence(app, result);
            app.assets.clamp_selection();
        }
    }
}

fn handle_add(app: &mut App) {
    let assets = &mut app.assets;
    if let Err(e) = assets.dialog.open_create("New asset") {
        log::debug!("Add ignored: {e}");
        return;
    }
    assets.form.load(AssetForm::new_asset());
    assets.form_focus = 0;
}

fn handle_edit(app: &mut App) {
    let assets = &mut app.assets;
    let Some(asset) = assets.current() else {
        return;
    };
    let title = format!("Edit {}", asset.label());
    let form = AssetForm::from(&asset);
    if let Err(e) = assets.dialog.open_edit(title, asset) {
        log::debug!("Edit ignored: {e}");
        return;
    }
    assets.form.load(form);
    assets.form_focus = 0;
}

fn handle_view(app: &mut App) {
    let assets = &mut app.assets;
    let Some(asset) = assets.current() else {
        return;
    };
    let title = asset.label().to_string();
    let form = AssetForm::from(&asset);
    if let Err(e) = assets.dialog.open_view(title, asset) {
        log::debug!("View ignored: {e}");
        return;
    }
    assets.form.load(form);
    assets.form_focus = 0;
}

fn handle_delete(app: &mut App) {
    let Some(asset) = app.assets.current() else {
        return;
    };
    let label = asset.label().to_string();
    let backend = Arc::clone(&app.backend);

    let staged = app
        .assets
        .confirm
        .confirm_delete(asset, label, move |asset: Asset| async move {
            backend.delete(&asset.id).await
        });
    if let Err(e) = staged {
        app.toasts.display(Severity::Warn, &e.to_string());
    }
}

fn handle_bulk_delete(app: &mut App) {
    let targets = app.assets.marked_assets();
    let backend = Arc::clone(&app.backend);

    let staged = app
        .assets
        .confirm
        .confirm_bulk_action(targets, "delete", move |targets: Vec<Asset>| async move {
            let ids: Vec<String> = targets.into_iter().map(|a| a.id).collect();
            let response = backend.bulk_delete(&ids).await?;
            if response.is_complete() {
                return Ok(());
            }
            let details = response
                .errors
                .iter()
                .map(|f| format!("{}: {}", f.id, f.error))
                .collect::<Vec<_>>()
                .join("; ");
            Err(CoreError::Conflict(format!(
                "{} of {} not deleted ({details})",
                response.errors.len(),
                ids.len()
            )))
        });
    if let Err(e) = staged {
        app.toasts.display(Severity::Warn, &e.to_string());
    }
}

/// 当前状态筛选值
fn status_filter(app: &App) -> Option<&str> {
    match app.assets.filters.filter("status") {
        Some(FilterCriterion::Equals(Value::String(status))) => Some(status.as_str()),
        _ => None,
    }
}

async fn handle_cycle_status(app: &mut App) {
    let next = match status_filter(app) {
        None => ASSET_STATUSES.first(),
        Some(current) => match ASSET_STATUSES.iter().position(|s| *s == current) {
            Some(i) => ASSET_STATUSES.get(i + 1),
            None => ASSET_STATUSES.first(),
        },
    };

    let filters = &mut app.assets.filters;
    let result = match next {
        Some(status) => filters.set_filter("status", FilterCriterion::equals(*status)).await,
        None => filters.remove_filter("status").await,
    };
    report_persistence(app, result);
    app.assets.clamp_selection();
}

async fn handle_cycle_sort(app: &mut App) {
    let cycle = sort_cycle();
    let current = app.assets.filters.sort().cloned();
    let next = cycle
        .iter()
        .position(|s| *s == current)
        .and_then(|i| cycle.get(i + 1))
        .cloned()
        .flatten();

    let filters = &mut app.assets.filters;
    let result = match next {
        Some(sort) => filters.set_sort(sort).await,
        None => filters.clear_sort().await,
    };
    report_persistence(app, result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdb_ui_core::traits::KeyValueStore;

    use crate::message::{AppMessage, TaskMessage};
    use crate::test_utils::{
        create_test_app, create_test_app_with_store, FailingKeyValueStore, TestApp, FILTER_KEY,
    };
    use crate::update::update;

    async fn loaded_app() -> TestApp {
        let mut t = create_test_app().await;
        update(&mut t.app, AppMessage::Content(ContentMessage::Refresh)).await;
        let msg = t.next_message().await;
        assert!(matches!(msg, AppMessage::Task(TaskMessage::Loaded)));
        update(&mut t.app, msg).await;
        t
    }

    fn visible_names(t: &TestApp) -> Vec<String> {
        t.app.assets.visible().into_iter().map(|a| a.name).collect()
    }

    #[tokio::test]
    async fn refresh_loads_the_demo_assets() {
        let t = loaded_app().await;
        assert_eq!(t.app.assets.visible().len(), 6);
        assert!(!t.app.assets.runner.is_loading());
    }

    #[tokio::test]
    async fn status_filter_cycles_and_is_persisted() {
        let mut t = loaded_app().await;

        update(&mut t.app, AppMessage::Content(ContentMessage::CycleStatusFilter)).await;
        assert_eq!(t.app.assets.visible().len(), 4);

        update(&mut t.app, AppMessage::Content(ContentMessage::CycleStatusFilter)).await;
        assert_eq!(visible_names(&t), vec!["HMI Packaging"]);
        let saved = t.store.get(FILTER_KEY).await.unwrap().unwrap();
        assert!(saved.contains("Maintenance"));

        update(&mut t.app, AppMessage::Content(ContentMessage::CycleStatusFilter)).await;
        update(&mut t.app, AppMessage::Content(ContentMessage::CycleStatusFilter)).await;
        assert_eq!(t.app.assets.visible().len(), 6);
        assert!(t.app.assets.filters.filter("status").is_none());
    }

    #[tokio::test]
    async fn sort_cycles_back_to_unsorted() {
        let mut t = loaded_app().await;

        update(&mut t.app, AppMessage::Content(ContentMessage::CycleSort)).await;
        assert_eq!(visible_names(&t)[0], "Core Switch");
        update(&mut t.app, AppMessage::Content(ContentMessage::CycleSort)).await;
        assert_eq!(visible_names(&t)[0], "PLC Line 2");

        for _ in 0..3 {
            update(&mut t.app, AppMessage::Content(ContentMessage::CycleSort)).await;
        }
        assert!(t.app.assets.filters.sort().is_none());
        assert_eq!(visible_names(&t)[0], "PLC Line 1");
    }

    #[tokio::test]
    async fn unsaved_filters_still_apply_and_warn() {
        let mut t = create_test_app_with_store(Arc::new(FailingKeyValueStore)).await;
        update(&mut t.app, AppMessage::Content(ContentMessage::Refresh)).await;
        let msg = t.next_message().await;
        update(&mut t.app, msg).await;

        update(&mut t.app, AppMessage::Content(ContentMessage::CycleStatusFilter)).await;

        assert_eq!(t.app.assets.visible().len(), 4);
        let (severity, message) = t.last_toast().unwrap();
        assert_eq!(severity, Severity::Warn);
        assert!(message.starts_with("Filters not saved"));
    }

    #[tokio::test]
    async fn edit_loads_the_selected_asset_into_the_form() {
        let mut t = loaded_app().await;
        update(&mut t.app, AppMessage::Content(ContentMessage::SelectNext)).await;
        update(&mut t.app, AppMessage::Content(ContentMessage::Edit)).await;

        let assets = &t.app.assets;
        assert_eq!(assets.dialog.title(), Some("Edit PLC Line 2"));
        assert_eq!(assets.form.form().tag, "PLC-002");
        assert!(!assets.form.state().is_dirty());
    }

    #[tokio::test]
    async fn delete_stages_a_confirmation_for_the_current_row() {
        let mut t = loaded_app().await;
        update(&mut t.app, AppMessage::Content(ContentMessage::Delete)).await;

        let prompt = t.app.assets.confirm.prompt().unwrap();
        assert_eq!(prompt.message, "Are you sure you want to delete \"PLC Line 1\"?");
        assert!(!prompt.is_bulk);
    }

    #[tokio::test]
    async fn bulk_delete_without_marks_only_warns() {
        let mut t = loaded_app().await;
        update(&mut t.app, AppMessage::Content(ContentMessage::BulkDelete)).await;

        assert!(!t.app.assets.confirm.is_visible());
        let (severity, message) = t.last_toast().unwrap();
        assert_eq!(severity, Severity::Warn);
        assert!(message.contains("nothing selected to delete"));
    }

    #[test]
    fn clear_filters_resets_search_and_sort() {
        tokio_test::block_on(async {
            let mut t = create_test_app().await;
            t.app.assets.filters.set_global_search("plc").await.unwrap();
            update(&mut t.app, AppMessage::Content(ContentMessage::CycleSort)).await;

            update(&mut t.app, AppMessage::Content(ContentMessage::ClearFilters)).await;

            assert!(!t.app.assets.filters.has_active_filters());
            assert!(t.app.assets.filters.sort().is_none());
            assert_eq!(t.store.get(FILTER_KEY).await.unwrap(), None);
        });
    }
}
