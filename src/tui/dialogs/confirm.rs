//! Confirmation dialog
//!
//! Yes/no confirmation for deleting rows and for quitting with unsaved
//! changes.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, ConfirmAction};
use crate::tui::layout::centered_rect_fixed;

/// Question shown for `action`
pub fn message(app: &App, action: ConfirmAction) -> String {
    match action {
        ConfirmAction::DeleteSelected => {
            let count = app.delete_targets().len();
            if count == 1 {
                "Delete the selected expense?".to_string()
            } else {
                format!("Delete {} marked expenses?", count)
            }
        }
        ConfirmAction::Quit => "There are unsaved changes. Quit anyway?".to_string(),
    }
}

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, app: &App, action: ConfirmAction) {
    let area = centered_rect_fixed(52, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut choices = vec![
        Span::styled("[Y]", Style::default().fg(Color::Green)),
        Span::raw(" Yes  "),
        Span::styled("[N]", Style::default().fg(Color::Red)),
        Span::raw(" No  "),
    ];
    if action == ConfirmAction::Quit {
        choices.push(Span::styled("[S]", Style::default().fg(Color::Cyan)));
        choices.push(Span::raw(" Save and quit"));
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message(app, action),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(choices),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Handle key input for a confirmation dialog
pub fn handle_key(app: &mut App, action: ConfirmAction, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.close_dialog();
            confirm(app, action);
        }
        KeyCode::Char('s') | KeyCode::Char('S') if action == ConfirmAction::Quit => {
            app.close_dialog();
            match app.service().save() {
                Ok(_) => app.quit(),
                Err(e) => app.set_status(format!("Save failed: {}", e)),
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
        _ => return false,
    }
    true
}

fn confirm(app: &mut App, action: ConfirmAction) {
    match action {
        ConfirmAction::DeleteSelected => {
            let targets = app.delete_targets();
            match app.service().delete(&targets) {
                Ok(removed) => {
                    app.marked.clear();
                    app.refresh_view();
                    app.set_status(format!("Deleted {} expense(s)", removed.len()));
                }
                Err(e) => app.set_status(format!("Delete failed: {}", e)),
            }
        }
        ConfirmAction::Quit => app.quit(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExpensePaths, Settings};
    use crate::models::{Expense, Money};
    use crate::storage::{Ledger, LoadMode};
    use crate::tui::app::ActiveDialog;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn test_app(temp_dir: &TempDir, rows: usize) -> App {
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut ledger = Ledger::new(paths.default_ledger_file());
        for day in 1..=rows {
            ledger.push(Expense::new(
                NaiveDate::from_ymd_opt(2025, 1, day as u32).unwrap(),
                "Food",
                Money::from_cents(100),
                format!("row {}", day),
            ));
        }
        App::new(paths, Settings::default(), ledger, LoadMode::Strict)
    }

    #[test]
    fn test_delete_marked_rows() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = test_app(&temp_dir, 4);
        app.marked.extend([1, 3]);

        app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteSelected));
        assert_eq!(message(&app, ConfirmAction::DeleteSelected), "Delete 2 marked expenses?");
        handle_key(&mut app, ConfirmAction::DeleteSelected, key('y'));

        let left: Vec<&str> = app.ledger.expenses().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(left, vec!["row 1", "row 3"]);
        assert!(app.marked.is_empty());
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_failed_delete_keeps_rows_and_marks() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = test_app(&temp_dir, 4);
        std::fs::create_dir(app.paths.audit_log()).unwrap();
        app.marked.extend([1, 3]);

        app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteSelected));
        handle_key(&mut app, ConfirmAction::DeleteSelected, key('y'));

        assert_eq!(app.ledger.len(), 4);
        assert_eq!(app.delete_targets(), vec![1, 3]);
        assert!(app.status_message.as_deref().unwrap_or("").starts_with("Delete failed"));
    }

    #[test]
    fn test_cancel_keeps_rows() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = test_app(&temp_dir, 2);
        app.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteSelected));
        handle_key(&mut app, ConfirmAction::DeleteSelected, key('n'));
        assert_eq!(app.ledger.len(), 2);
    }

    #[test]
    fn test_save_and_quit() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = test_app(&temp_dir, 1);
        app.request_quit();
        handle_key(&mut app, ConfirmAction::Quit, key('s'));

        assert!(app.should_quit);
        assert!(app.paths.default_ledger_file().exists());
    }
}
