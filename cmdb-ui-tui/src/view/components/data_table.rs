//! 数据表格组件
//!
//! 按 RequestRunner 的状态显示：首次加载中、加载失败、无数据、数据行。
//! 已有数据时重新加载不会清空表格，只在标题上显示加载中。

use cmdb_ui_core::ErrorInfo;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::truncate;
use crate::view::theme::{colors, Styles};

/// 表格列定义
pub struct Column<T> {
    pub title: &'static str,
    /// 显示宽度（字符）
    pub width: u16,
    pub value: fn(&T) -> String,
    /// 按单元格内容着色，None 时使用普通前景色
    pub color: Option<fn(&T) -> Color>,
}

/// 数据表格
pub struct DataTableView<'a, T> {
    title: String,
    columns: &'a [Column<T>],
    rows: &'a [T],
    selected: usize,
    loading: bool,
    error: Option<&'a ErrorInfo>,
    empty_message: &'a str,
    is_marked: Option<&'a dyn Fn(&T) -> bool>,
}

impl<'a, T> DataTableView<'a, T> {
    pub fn new(title: impl Into<String>, columns: &'a [Column<T>], rows: &'a [T]) -> Self {
        Self {
            title: title.into(),
            columns,
            rows,
            selected: 0,
            loading: false,
            error: None,
            empty_message: "No data",
            is_marked: None,
        }
    }

    #[must_use]
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn error(mut self, error: Option<&'a ErrorInfo>) -> Self {
        self.error = error;
        self
    }

    #[must_use]
    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    /// 显示批量选择标记列
    #[must_use]
    pub fn marked_by(mut self, is_marked: &'a dyn Fn(&T) -> bool) -> Self {
        self.is_marked = Some(is_marked);
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let c = colors();

        let mut title = format!(" {} ({}) ", self.title, self.rows.len());
        if self.loading {
            title.push_str("⟳ ");
        }
        let block = Block::default()
            .title(title)
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(c.border_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // 错误信息占一行，表格保留已有数据
        let table_area = match self.error {
            Some(error) if inner.height > 1 => {
                let line = Line::from(vec![
                    Span::styled(" ✗ ", Style::default().fg(c.error).add_modifier(Modifier::BOLD)),
                    Span::styled(error.message.clone(), Style::default().fg(c.error)),
                ]);
                frame.render_widget(Paragraph::new(line), Rect { height: 1, ..inner });
                Rect {
                    y: inner.y + 1,
                    height: inner.height - 1,
                    ..inner
                }
            }
            _ => inner,
        };

        if self.rows.is_empty() {
            self.render_placeholder(frame, table_area);
        } else {
            self.render_rows(frame, table_area);
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        let c = colors();
        let text = if self.loading {
            "Loading..."
        } else if self.error.is_some() {
            "Press r to retry."
        } else {
            self.empty_message
        };
        let content = vec![
            Line::from(""),
            Line::styled(format!("  {text}"), Style::default().fg(c.muted)),
        ];
        frame.render_widget(Paragraph::new(content), area);
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect) {
        let c = colors();

        let mut widths: Vec<Constraint> = Vec::with_capacity(self.columns.len() + 1);
        let mut header: Vec<Cell> = Vec::with_capacity(self.columns.len() + 1);
        if self.is_marked.is_some() {
            widths.push(Constraint::Length(1));
            header.push(Cell::from(""));
        }
        for column in self.columns {
            widths.push(Constraint::Length(column.width));
            header.push(Cell::from(column.title));
        }

        let column_count = widths.len();
        let rows = self.rows.iter().map(|item| {
            let mut cells: Vec<Cell> = Vec::with_capacity(column_count);
            if let Some(is_marked) = self.is_marked {
                let mark = if is_marked(item) { "●" } else { " " };
                cells.push(Cell::from(Span::styled(mark, Style::default().fg(c.warning))));
            }
            for column in self.columns {
                let text = (column.value)(item);
                let mut cell = Cell::from(truncate(&text, usize::from(column.width)));
                if let Some(color) = column.color {
                    cell = cell.style(Style::default().fg(color(item)));
                }
                cells.push(cell);
            }
            Row::new(cells).style(Style::default().fg(c.fg))
        });

        let table = Table::new(rows, widths)
            .header(
                Row::new(header).style(
                    Style::default()
                        .fg(c.muted)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
            )
            .column_spacing(2)
            .row_highlight_style(Styles::selected())
            .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(self.selected.min(self.rows.len() - 1)));
        frame.render_stateful_widget(table, area, &mut state);
    }
}
