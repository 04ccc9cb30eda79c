//! 主布局渲染

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::model::App;

use super::components;
use super::pages;
use super::theme::colors;

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 四层布局：标题栏 + 筛选栏 + 资产表格 + 状态栏
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Length(1), // 筛选栏
            Constraint::Min(1),    // 资产表格
            Constraint::Length(1), // 状态栏
        ])
        .split(size);

    render_title_bar(app, frame, main_layout[0]);
    pages::assets::render_filter_bar(app, frame, main_layout[1]);
    pages::assets::render_table(app, frame, main_layout[2]);
    components::statusbar::render(app, frame, main_layout[3]);

    // 弹窗（在最上层）
    pages::assets::render_form_dialog(app, frame);
    pages::assets::render_confirm_dialog(app, frame);
    components::toast::render(&app.toasts.active(), frame);
}

/// 渲染标题栏
fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let title = Paragraph::new(format!(
        " CMDB Assets v{} · {}",
        env!("CARGO_PKG_VERSION"),
        app.backend_name()
    ))
    .style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(title, area);
}
