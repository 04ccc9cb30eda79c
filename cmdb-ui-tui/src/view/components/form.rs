//! 表单组件
//!
//! 每个字段占两行：`标签: 值`，以及字段错误（没有错误时为空行）。

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::view::theme::colors;

/// 单个字段的显示数据
pub struct FormFieldView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub error: Option<&'a str>,
    pub required: bool,
    pub focused: bool,
}

/// 表单
pub struct FormView<'a> {
    fields: Vec<FormFieldView<'a>>,
    read_only: bool,
    submitting: bool,
}

impl<'a> FormView<'a> {
    pub fn new(fields: Vec<FormFieldView<'a>>) -> Self {
        Self {
            fields,
            read_only: false,
            submitting: false,
        }
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub fn submitting(mut self, submitting: bool) -> Self {
        self.submitting = submitting;
        self
    }

    /// 渲染所需的行数
    pub fn height(&self) -> u16 {
        u16::try_from(self.fields.len() * 2).unwrap_or(u16::MAX)
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let c = colors();
        let label_width = self
            .fields
            .iter()
            .map(|f| f.label.len() + 1)
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(self.fields.len() * 2);
        for field in &self.fields {
            let marker = if field.required && !self.read_only { "*" } else { " " };
            let label = format!("{:>width$}{marker} ", field.label, width = label_width.saturating_sub(1));

            let label_style = if field.focused && !self.read_only {
                Style::default().fg(c.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(c.muted)
            };

            let mut spans = vec![
                Span::styled(label, label_style),
                Span::styled(field.value.to_string(), Style::default().fg(c.fg)),
            ];
            // 光标
            if field.focused && !self.read_only && !self.submitting {
                spans.push(Span::styled("▏", Style::default().fg(c.highlight)));
            }
            lines.push(Line::from(spans));

            match field.error {
                Some(error) => lines.push(Line::styled(
                    format!("{:width$}  {error}", "", width = label_width),
                    Style::default().fg(c.error),
                )),
                None => lines.push(Line::from("")),
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
