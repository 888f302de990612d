//! Event handler for the TUI
//!
//! Routes key events to the active dialog, or to the global and view keys
//! in normal mode.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, ConfirmAction, PathAction};
use super::dialogs;
use super::event::Event;

const PAGE: isize = 10;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) | Event::Tick => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.has_dialog() {
        dialogs::handle_key(app, key);
        return Ok(());
    }

    app.clear_status();
    if !handle_global_key(app, key) {
        match app.active_view {
            ActiveView::Expenses => handle_expenses_key(app, key),
            ActiveView::Summary => handle_summary_key(app, key),
        }
    }
    Ok(())
}

/// Keys that work in every view; returns true if handled
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => app.request_quit(),
        KeyCode::Char('s') if ctrl => save(app),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Tab => app.switch_view(match app.active_view {
            ActiveView::Expenses => ActiveView::Summary,
            ActiveView::Summary => ActiveView::Expenses,
        }),
        KeyCode::Char('1') => app.switch_view(ActiveView::Expenses),
        KeyCode::Char('2') => app.switch_view(ActiveView::Summary),
        KeyCode::Char('s') => save(app),
        KeyCode::Char('S') => app.open_dialog(ActiveDialog::Path(PathAction::SaveAs)),
        KeyCode::Char('o') => app.open_dialog(ActiveDialog::Path(PathAction::Load)),
        KeyCode::Char('x') => app.open_dialog(ActiveDialog::Path(PathAction::ExportSummary)),
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_dialog(ActiveDialog::AddExpense),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::PageDown => app.move_by(PAGE),
        KeyCode::PageUp => app.move_by(-PAGE),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_start(),
        _ => return false,
    }
    true
}

fn handle_expenses_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('G') | KeyCode::End => app.move_to_end(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(row) = app.selected_row() {
                app.open_dialog(ActiveDialog::EditExpense(row));
            }
        }
        KeyCode::Char(' ') => app.toggle_mark(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if app.delete_targets().is_empty() {
                app.set_status("Nothing to delete");
            } else {
                app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteSelected));
            }
        }
        KeyCode::Char('f') => app.open_dialog(ActiveDialog::Filter),
        KeyCode::Char('c') | KeyCode::Char('F') => {
            if app.filter.is_active() {
                app.filter = Default::default();
                app.refresh_view();
                app.set_status("Filter cleared");
            }
        }
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Char('G') | KeyCode::End) {
        let months = app.summary().rows().len();
        app.summary_scroll = months.saturating_sub(1);
    }
}

fn save(app: &mut App) {
    let message = match app.service().save() {
        Ok(path) => format!("Saved {} expense(s) to {}", app.ledger.len(), path.display()),
        Err(e) => format!("Save failed: {}", e),
    };
    app.set_status(message);
}
