//! Help dialog
//!
//! Shows keyboard shortcuts for the active view

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    ))
}

fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys"),
        Line::from(""),
        key_line("q/Esc", "Quit (asks if there are unsaved changes)"),
        key_line("?", "Show/hide help"),
        key_line("Tab/1/2", "Switch between Expenses and Summary"),
        key_line("s/Ctrl+s", "Save to the current file"),
        key_line("S", "Save as..."),
        key_line("o", "Load a CSV file"),
        key_line("x", "Export the monthly summary"),
        Line::from(""),
    ];

    match view {
        ActiveView::Expenses => {
            lines.push(heading("Expenses"));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Move selection down/up"));
            lines.push(key_line("g/G", "Go to top/bottom"));
            lines.push(key_line("a/n", "Add expense"));
            lines.push(key_line("e/Enter", "Edit selected expense"));
            lines.push(key_line("Space", "Mark/unmark row"));
            lines.push(key_line("d/Del", "Delete marked rows (or the selected one)"));
            lines.push(key_line("f", "Filter by date range and category"));
            lines.push(key_line("c", "Clear filter"));
        }
        ActiveView::Summary => {
            lines.push(heading("Monthly Summary"));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Scroll months"));
            lines.push(key_line("a/n", "Add expense"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
