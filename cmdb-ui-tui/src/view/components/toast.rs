//! 提示消息组件
//!
//! 右上角自上而下堆叠，新消息在下。

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::truncate;
use crate::model::Toast;
use crate::view::theme::colors;

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// 渲染提示消息
pub fn render(toasts: &[Toast], frame: &mut Frame) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let c = colors();

    // 跳过标题栏
    let mut y = area.y + 1;
    for toast in toasts {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width - width, y, width, TOAST_HEIGHT);
        let color = c.severity(toast.severity);

        let text_width = usize::from(width.saturating_sub(4)).saturating_sub(toast.severity.label().len() + 1);
        let line = Line::from(vec![
            Span::styled(
                toast.severity.label(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(truncate(&toast.message, text_width), Style::default().fg(c.fg)),
        ]);

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(c.bg)),
            ),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}
