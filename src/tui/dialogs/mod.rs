//! Modal dialogs
//!
//! Each dialog owns its rendering and key handling; `App::active_dialog`
//! decides which one is shown.

pub mod confirm;
pub mod expense;
pub mod filter;
pub mod help;
pub mod path;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use super::app::{ActiveDialog, App};

/// Render the active dialog, if any
pub fn render(frame: &mut Frame, app: &App) {
    match app.active_dialog {
        ActiveDialog::AddExpense | ActiveDialog::EditExpense(_) => expense::render(frame, app),
        ActiveDialog::Filter => filter::render(frame, app),
        ActiveDialog::Path(action) => path::render(frame, app, action),
        ActiveDialog::Confirm(action) => confirm::render(frame, app, action),
        ActiveDialog::Help => help::render(frame, app),
        ActiveDialog::None => {}
    }
}

/// Route a key to the active dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.active_dialog {
        ActiveDialog::AddExpense | ActiveDialog::EditExpense(_) => expense::handle_key(app, key),
        ActiveDialog::Filter => filter::handle_key(app, key),
        ActiveDialog::Path(action) => path::handle_key(app, action, key),
        ActiveDialog::Confirm(action) => confirm::handle_key(app, action, key),
        ActiveDialog::Help => {
            app.close_dialog();
            true
        }
        ActiveDialog::None => false,
    }
}
