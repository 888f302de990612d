//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use std::io::{self, Stdout};
use std::panic;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::config::{ExpensePaths, Settings};
use crate::storage::{Ledger, LoadMode};

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
///
/// The ledger is opened before the terminal is touched so a malformed file
/// is reported on the normal screen and never overwritten.
pub fn run_tui(
    paths: ExpensePaths,
    settings: Settings,
    ledger_path: PathBuf,
    load_mode: LoadMode,
) -> Result<()> {
    let (ledger, report) = Ledger::open(&ledger_path, load_mode, &settings.default_category)
        .with_context(|| {
            format!(
                "Could not open {} (use --skip-invalid to load the valid rows)",
                ledger_path.display()
            )
        })?;

    let mut app = App::new(paths, settings, ledger, load_mode);
    if !report.skipped.is_empty() {
        app.set_status(format!(
            "Skipped {} malformed row(s) in {}",
            report.skipped.len(),
            ledger_path.display()
        ));
    }

    let mut terminal = init_terminal()?;
    info!(path = %ledger_path.display(), "started TUI");

    let result = run_loop(&mut terminal, &mut app);
    restore_terminal()?;

    if let Err(e) = &result {
        error!(error = %e, "TUI exited with an error");
    }
    result
}

fn run_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_event(app, Event::Key(key))?,
            Event::Resize(_, _) | Event::Tick => {}
        }
    }

    Ok(())
}
