//! 终端初始化和清理

use std::io::{self, Stdout};
use std::panic;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// 终端类型别名
pub type Term = Terminal<CrosstermBackend<Stdout>>;

/// 初始化终端
///
/// 同时安装 panic hook：panic 时先恢复终端再打印信息，否则信息会留在备用屏幕里。
pub fn init_terminal() -> Result<Term> {
    install_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// 恢复终端
pub fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        tracing::error!("panic: {info}");
        previous(info);
    }));
}
