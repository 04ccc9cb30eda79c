//! 弹窗外壳组件
//!
//! 绘制居中的边框和底部按键提示，返回内容区域供调用方渲染表单等内容。

use cmdb_ui_core::types::DialogMode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::view::theme::{colors, Styles};

/// 弹窗
pub struct DialogView<'a> {
    title: &'a str,
    mode: DialogMode,
    width: u16,
    body_height: u16,
    busy: bool,
}

impl<'a> DialogView<'a> {
    pub fn new(title: &'a str, mode: DialogMode) -> Self {
        Self {
            title,
            mode,
            width: 60,
            body_height: 10,
            busy: false,
        }
    }

    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// 内容区域高度（不含边框和提示行）
    #[must_use]
    pub fn body_height(mut self, height: u16) -> Self {
        self.body_height = height;
        self
    }

    /// 提交中：提示行显示 Saving...
    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    /// 绘制外壳，返回内容区域
    pub fn render(self, frame: &mut Frame) -> Rect {
        let c = colors();
        // 边框 2 行 + 空行 + 提示行
        let area = centered_rect(self.width, self.body_height + 4, frame.area());
        frame.render_widget(Clear, area);

        let border = match self.mode {
            DialogMode::View => c.border,
            DialogMode::Create | DialogMode::Edit => c.border_focused,
        };
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(c.bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let footer_area = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: inner.height.min(1),
            ..inner
        };
        frame.render_widget(Paragraph::new(self.footer()), footer_area);

        Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            height: inner.height.saturating_sub(2),
            ..inner
        }
    }

    fn footer(&self) -> Line<'static> {
        let c = colors();
        if self.busy {
            return Line::styled(
                " Saving...",
                Style::default().fg(c.warning).add_modifier(Modifier::ITALIC),
            );
        }

        let hints: &[(&str, &str)] = match self.mode {
            DialogMode::View => &[("Enter/Esc", "Close")],
            DialogMode::Create | DialogMode::Edit => {
                &[("Tab", "Next"), ("Shift+Tab", "Previous"), ("Enter", "Save"), ("Esc", "Cancel")]
            }
        };
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Styles::hint_key()));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*desc, Styles::hint_desc()));
        }
        Line::from(spans)
    }
}
