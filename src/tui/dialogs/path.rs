//! Path prompt
//!
//! Single-field dialog asking for a file path to load, save to, or export
//! the monthly summary to.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::ExpenseResult;
use crate::export::{export_summary_file, ExportFormat};
use crate::tui::app::{App, PathAction};
use crate::tui::layout::{centered_rect_fixed, dialog_inner};
use crate::tui::widgets::{render_field, TextInput};

/// State for the path prompt
#[derive(Debug, Clone, Default)]
pub struct PathPromptState {
    pub input: TextInput,
    pub error_message: Option<String>,
}

impl PathPromptState {
    /// Prompt prefilled with a sensible path for `action`
    pub fn for_action(action: PathAction, app: &App) -> Self {
        let initial = match action {
            PathAction::Load | PathAction::SaveAs => app.ledger.path().to_path_buf(),
            PathAction::ExportSummary => app.paths.base_dir().join("summary.csv"),
        };
        Self {
            input: TextInput::new().content(initial.display().to_string()),
            error_message: None,
        }
    }
}

fn title(action: PathAction) -> &'static str {
    match action {
        PathAction::Load => " Load CSV ",
        PathAction::SaveAs => " Save As ",
        PathAction::ExportSummary => " Export Summary (.csv/.json/.yaml) ",
    }
}

/// Render the path prompt
pub fn render(frame: &mut Frame, app: &App, action: PathAction) {
    let prompt = &app.path_prompt;
    let area = centered_rect_fixed(70, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title(action))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(dialog_inner(area));

    render_field(frame, chunks[0], "Path", prompt.input.spans(true), true);

    if let Some(error) = &prompt.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: true }),
            chunks[1],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" OK  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}

/// Handle key input for the path prompt
pub fn handle_key(app: &mut App, action: PathAction, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => {
            let raw = app.path_prompt.input.value().trim().to_string();
            if raw.is_empty() {
                app.path_prompt.error_message = Some("Enter a file path".into());
                return true;
            }

            match run(app, action, PathBuf::from(raw)) {
                Ok(message) => {
                    app.close_dialog();
                    app.refresh_view();
                    app.set_status(message);
                }
                Err(e) => app.path_prompt.error_message = Some(e.to_string()),
            }
        }
        _ => {
            let consumed = app.path_prompt.input.handle_key(key);
            if consumed {
                app.path_prompt.error_message = None;
            }
            return consumed;
        }
    }
    true
}

fn run(app: &mut App, action: PathAction, path: PathBuf) -> ExpenseResult<String> {
    match action {
        PathAction::Load => {
            let mode = app.load_mode;
            let report = app.service().load(&path, mode)?;
            app.selected_index = 0;
            app.marked.clear();

            let mut message = format!(
                "Loaded {} expense(s) from {}",
                report.expenses.len(),
                path.display()
            );
            if !report.skipped.is_empty() {
                message.push_str(&format!(", skipped {} malformed row(s)", report.skipped.len()));
            }
            Ok(message)
        }
        PathAction::SaveAs => {
            let saved = app.service().save_as(&path)?;
            Ok(format!("Saved {} expense(s) to {}", app.ledger.len(), saved.display()))
        }
        PathAction::ExportSummary => {
            let summary = app.summary();
            export_summary_file(&summary, ExportFormat::from_path(&path), &path)?;
            Ok(format!(
                "Exported {} month(s) to {}",
                summary.rows().len(),
                path.display()
            ))
        }
    }
}
