use anyhow::Result;
use crossterm::{
    cursor, execute, queue,
    terminal::{self, ClearType},
};
use std::io::{self, Write};

use crate::tui::state::DashboardApp;
use crate::tui::state_render::build_render_plan;

impl DashboardApp {
    pub(crate) fn draw(&self) -> Result<()> {
        let (w, h) = terminal::size()?;
        let plan = build_render_plan(self, w, h);
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for line in &plan.header_lines {
            write!(stdout, "{line}")?;
        }
        write!(stdout, "{}", plan.search_line)?;
        for line in &plan.body_lines {
            write!(stdout, "{line}")?;
        }
        stdout.flush()?;
        Ok(())
    }
}

/// Raw-mode/alternate-screen guard; Drop restores the terminal even
/// when the event loop exits with an error.
pub(crate) struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

pub(crate) fn enter_terminal() -> Result<TuiGuard> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    Ok(TuiGuard)
}
