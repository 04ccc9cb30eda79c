//! 可复用的展示组件
//!
//! 组件只读取传入的数据，不持有状态，也不修改 Model。
//!
//!     data_table.rs       DataTableView：加载 / 错误 / 空状态与数据行
//!     form.rs             FormView：标签、值、字段错误
//!     dialog.rs           DialogView：居中弹窗外壳
//!     confirm_dialog.rs   ConfirmDialogView：删除确认
//!     toast.rs            提示消息
//!     statusbar.rs        底部快捷键提示

pub mod confirm_dialog;
pub mod data_table;
pub mod dialog;
pub mod form;
pub mod statusbar;
pub mod toast;

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub use confirm_dialog::ConfirmDialogView;
pub use data_table::{Column, DataTableView};
pub use dialog::DialogView;
pub use form::{FormFieldView, FormView};

/// 计算居中弹窗的区域
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 按显示宽度截断文本，超出时以 `…` 结尾
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
