//! 主题和样式定义
//!
//! 调色板在启动时按配置选定，之后所有组件通过 `colors()` 读取。

use std::sync::atomic::{AtomicBool, Ordering};

use cmdb_ui_core::types::Severity;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

static LIGHT_THEME: AtomicBool = AtomicBool::new(false);

/// 主题（配置文件中为 "dark" / "light"）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn palette(self) -> &'static ThemeColors {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

/// 设置当前主题
pub fn set_theme(theme: Theme) {
    LIGHT_THEME.store(theme == Theme::Light, Ordering::Relaxed);
}

/// 当前主题
pub fn current_theme() -> Theme {
    if LIGHT_THEME.load(Ordering::Relaxed) {
        Theme::Light
    } else {
        Theme::Dark
    }
}

/// 当前主题的调色板
pub fn colors() -> &'static ThemeColors {
    current_theme().palette()
}

/// 调色板
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub key: Color,
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
}

const DARK: ThemeColors = ThemeColors {
    bg: Color::Rgb(28, 30, 34),
    fg: Color::Rgb(215, 218, 224),
    muted: Color::Rgb(125, 130, 140),
    border: Color::Rgb(64, 68, 76),
    border_focused: Color::Rgb(82, 139, 255),
    highlight: Color::Rgb(82, 139, 255),
    selected_bg: Color::Rgb(44, 74, 128),
    selected_fg: Color::White,
    bar_bg: Color::Rgb(40, 44, 52),
    bar_fg: Color::Rgb(215, 218, 224),
    key: Color::Rgb(229, 192, 123),
    success: Color::Rgb(120, 200, 140),
    info: Color::Rgb(97, 175, 239),
    warning: Color::Rgb(229, 160, 90),
    error: Color::Rgb(235, 100, 100),
};

const LIGHT: ThemeColors = ThemeColors {
    bg: Color::Rgb(250, 250, 250),
    fg: Color::Rgb(40, 44, 52),
    muted: Color::Rgb(120, 120, 120),
    border: Color::Rgb(200, 200, 200),
    border_focused: Color::Rgb(30, 100, 220),
    highlight: Color::Rgb(30, 100, 220),
    selected_bg: Color::Rgb(210, 228, 255),
    selected_fg: Color::Black,
    bar_bg: Color::Rgb(230, 232, 236),
    bar_fg: Color::Rgb(40, 44, 52),
    key: Color::Rgb(152, 104, 1),
    success: Color::Rgb(34, 134, 58),
    info: Color::Rgb(3, 102, 214),
    warning: Color::Rgb(176, 110, 0),
    error: Color::Rgb(200, 40, 50),
};

impl ThemeColors {
    /// 通知级别对应的颜色
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.success,
            Severity::Info => self.info,
            Severity::Warn => self.warning,
            Severity::Error => self.error,
        }
    }

    /// 资产状态对应的颜色，未知状态使用普通前景色
    pub fn asset_status(&self, status: &str) -> Color {
        match status {
            "Active" => self.success,
            "Maintenance" => self.warning,
            "Decommissioned" => self.muted,
            _ => self.fg,
        }
    }
}

/// 常用样式
pub struct Styles;

impl Styles {
    /// 选中行
    pub fn selected() -> Style {
        let c = colors();
        Style::default()
            .bg(c.selected_bg)
            .fg(c.selected_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default().fg(colors().fg).add_modifier(Modifier::BOLD)
    }

    pub fn statusbar() -> Style {
        let c = colors();
        Style::default().bg(c.bar_bg).fg(c.bar_fg)
    }

    /// 快捷键
    pub fn hint_key() -> Style {
        Style::default().fg(colors().key).add_modifier(Modifier::BOLD)
    }

    /// 快捷键说明
    pub fn hint_desc() -> Style {
        Style::default().fg(colors().muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_match_the_config_file() {
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }

    #[test]
    fn unknown_status_uses_the_foreground_color() {
        let c = Theme::Dark.palette();
        assert_eq!(c.asset_status("Active"), c.success);
        assert_eq!(c.asset_status("Retired?"), c.fg);
    }
}
