//! 确认弹窗组件

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered_rect, truncate};
use crate::view::theme::{colors, Styles};

/// 最多列出的目标数
const MAX_LISTED: usize = 5;

/// 删除确认弹窗
pub struct ConfirmDialogView<'a> {
    message: &'a str,
    targets: Vec<String>,
    executing: bool,
}

impl<'a> ConfirmDialogView<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            targets: Vec::new(),
            executing: false,
        }
    }

    /// 批量操作时列出目标
    #[must_use]
    pub fn targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }

    #[must_use]
    pub fn executing(mut self, executing: bool) -> Self {
        self.executing = executing;
        self
    }

    pub fn render(self, frame: &mut Frame) {
        let c = colors();
        let width: u16 = 56;
        let listed = self.targets.len().min(MAX_LISTED);
        let extra = usize::from(self.targets.len() > MAX_LISTED);
        let height = u16::try_from(listed + extra).unwrap_or(0) + 8;

        let area = centered_rect(width, height, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Confirm ")
            .title_alignment(Alignment::Center)
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(c.error))
            .style(Style::default().bg(c.bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let inner = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };

        let mut lines = vec![
            Line::from(""),
            Line::styled(self.message.to_string(), Style::default().fg(c.fg)),
        ];
        if !self.targets.is_empty() {
            lines.push(Line::from(""));
            let item_width = usize::from(inner.width.saturating_sub(4));
            for target in self.targets.iter().take(MAX_LISTED) {
                lines.push(Line::styled(
                    format!("  • {}", truncate(target, item_width)),
                    Style::default().fg(c.warning),
                ));
            }
            if extra > 0 {
                lines.push(Line::styled(
                    format!("  … and {} more", self.targets.len() - MAX_LISTED),
                    Style::default().fg(c.muted),
                ));
            }
        }
        lines.push(Line::from(""));
        if self.executing {
            lines.push(Line::styled(
                "Working...",
                Style::default().fg(c.warning).add_modifier(Modifier::ITALIC),
            ));
        } else {
            lines.push(Line::from(vec![
                Span::styled("Enter/y", Styles::hint_key()),
                Span::raw(" "),
                Span::styled("Delete", Style::default().fg(c.error)),
                Span::raw("   "),
                Span::styled("Esc/n", Styles::hint_key()),
                Span::raw(" "),
                Span::styled("Cancel", Styles::hint_desc()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
