//! 底部状态栏组件

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::App;
use crate::view::theme::{colors, Styles};

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    // 根据当前输入模式生成快捷键提示
    let hints = get_hints(app);
    let separator = Style::default().fg(colors().border);

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", separator));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    // 批量标记数量显示在右侧
    let marked = app.assets.marked.len();
    if marked > 0 {
        spans.push(Span::styled(" │ ", separator));
        spans.push(Span::styled(
            format!("{marked} marked"),
            Style::default().fg(colors().warning),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// 根据当前状态生成快捷键提示
fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let assets = &app.assets;

    if assets.confirm.is_visible() {
        if assets.confirm.is_executing() {
            return vec![("…", "Working")];
        }
        return vec![("Enter/y", "Confirm"), ("Esc/n", "Cancel")];
    }

    if assets.dialog.is_visible() {
        if assets.dialog.is_read_only() {
            return vec![("Enter/Esc", "Close")];
        }
        return vec![
            ("Tab/↓", "Next Field"),
            ("Shift+Tab/↑", "Previous Field"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ];
    }

    if assets.search.is_some() {
        return vec![("Enter", "Apply"), ("Esc", "Cancel")];
    }

    let mut hints = vec![
        ("↑↓", "Select"),
        ("a", "Add"),
        ("e", "Edit"),
        ("v", "View"),
        ("d", "Delete"),
        ("Space", "Mark"),
    ];
    if !assets.marked.is_empty() {
        hints.push(("D", "Delete Marked"));
    }
    hints.extend([
        ("/", "Search"),
        ("f", "Status"),
        ("s", "Sort"),
    ]);
    if assets.filters.has_active_filters() || assets.filters.sort().is_some() {
        hints.push(("c", "Clear"));
    }
    hints.extend([("r", "Refresh"), ("q", "Quit")]);

    hints
}
