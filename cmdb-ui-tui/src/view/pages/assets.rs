//! 资产页面视图
//!
//! 列表、筛选栏和表单弹窗都从 AssetsState 读取，组件本身不持有状态。

use cmdb_ui_core::types::FilterCriterion;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::domain::{Asset, FormField};
use crate::model::App;
use crate::view::components::{
    Column, ConfirmDialogView, DataTableView, DialogView, FormFieldView, FormView,
};
use crate::view::theme::{colors, Styles};

/// 资产表格的列
const COLUMNS: [Column<Asset>; 6] = [
    Column { title: "Name", width: 20, value: |a| a.name.clone(), color: None },
    Column { title: "Tag", width: 10, value: |a| a.tag.clone(), color: None },
    Column { title: "Type", width: 12, value: |a| a.asset_type.clone(), color: None },
    Column { title: "Site", width: 12, value: |a| a.site.clone(), color: None },
    Column { title: "IP", width: 15, value: |a| a.ip_address.clone(), color: None },
    Column {
        title: "Status",
        width: 14,
        value: |a| a.status.clone(),
        color: Some(|a| colors().asset_status(&a.status)),
    },
];

/// 渲染筛选栏：搜索、状态筛选、排序
pub fn render_filter_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let filters = &app.assets.filters;
    let mut spans = vec![Span::styled(" Search: ", Styles::hint_desc())];

    match &app.assets.search {
        Some(search) => {
            spans.push(Span::styled(
                search.draft.clone(),
                Style::default().fg(c.fg).add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::styled("▏", Style::default().fg(c.highlight)));
        }
        None if filters.global_search().is_empty() => {
            spans.push(Span::styled("-", Styles::hint_desc()));
        }
        None => spans.push(Span::styled(
            filters.global_search().to_string(),
            Style::default().fg(c.fg),
        )),
    }

    spans.push(Span::styled("   Status: ", Styles::hint_desc()));
    let status = match filters.filter("status") {
        Some(FilterCriterion::Equals(value)) => value.as_str().unwrap_or("-").to_string(),
        Some(_) => "custom".to_string(),
        None => "All".to_string(),
    };
    spans.push(Span::styled(status, Style::default().fg(c.fg)));

    spans.push(Span::styled("   Sort: ", Styles::hint_desc()));
    let sort = filters
        .sort()
        .map_or_else(|| "-".to_string(), |s| format!("{} {}", s.field, s.order.as_str()));
    spans.push(Span::styled(sort, Style::default().fg(c.fg)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// 渲染资产表格
pub fn render_table(app: &App, frame: &mut Frame, area: Rect) {
    let assets = &app.assets;
    let state = assets.runner.state();
    let rows = assets.visible();

    let empty_message = if assets.filters.has_active_filters() {
        "No assets match the current filters. Press c to clear."
    } else {
        "No assets yet. Press a to add one."
    };
    let is_marked = |asset: &Asset| assets.is_marked(&asset.id);

    DataTableView::new("Assets", &COLUMNS, &rows)
        .selected(assets.selected)
        .loading(state.loading)
        .error(state.error.as_ref())
        .empty_message(empty_message)
        .marked_by(&is_marked)
        .render(frame, area);
}

/// 渲染表单弹窗
pub fn render_form_dialog(app: &App, frame: &mut Frame) {
    let assets = &app.assets;
    let Some(mode) = assets.dialog.mode() else {
        return;
    };
    let title = assets.dialog.title().unwrap_or_default();
    let state = assets.form.state();
    let read_only = assets.dialog.is_read_only();
    let focused = assets.focused_field();

    let fields = FormField::ALL
        .iter()
        .map(|&field| FormFieldView {
            label: field.label(),
            value: state.form.value(field),
            error: state.error(field.key()),
            required: field.is_required(),
            focused: field == focused,
        })
        .collect();
    let form = FormView::new(fields)
        .read_only(read_only)
        .submitting(state.is_submitting);

    let body = DialogView::new(title, mode)
        .width(64)
        .body_height(form.height())
        .busy(state.is_submitting)
        .render(frame);
    form.render(frame, body);
}

/// 渲染删除确认弹窗
pub fn render_confirm_dialog(app: &App, frame: &mut Frame) {
    let Some(prompt) = app.assets.confirm.prompt() else {
        return;
    };
    let targets = if prompt.is_bulk {
        prompt.targets.iter().map(|a| a.label().to_string()).collect()
    } else {
        Vec::new()
    };

    ConfirmDialogView::new(&prompt.message)
        .targets(targets)
        .executing(app.assets.confirm.is_executing())
        .render(frame);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::message::{AppMessage, ContentMessage};
    use crate::test_utils::create_test_app;
    use crate::update::update;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn table_shows_loaded_assets() {
        let mut t = create_test_app().await;
        update(&mut t.app, AppMessage::Content(ContentMessage::Refresh)).await;
        let msg = t.next_message().await;
        update(&mut t.app, msg).await;

        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal
            .draw(|frame| render_table(&t.app, frame, frame.area()))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Assets (6)"));
        assert!(text.contains("PLC Line 1"));
    }

    #[tokio::test]
    async fn empty_table_explains_how_to_add() {
        let t = create_test_app().await;

        let mut terminal = Terminal::new(TestBackend::new(120, 10)).unwrap();
        terminal
            .draw(|frame| render_table(&t.app, frame, frame.area()))
            .unwrap();

        assert!(screen(&terminal).contains("No assets yet. Press a to add one."));
    }

    #[tokio::test]
    async fn form_dialog_marks_required_fields() {
        let mut t = create_test_app().await;
        update(&mut t.app, AppMessage::Content(ContentMessage::Add)).await;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render_form_dialog(&t.app, frame))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("New asset"));
        assert!(text.contains("Name*"));
        assert!(text.contains("Serial number "));
    }
}
