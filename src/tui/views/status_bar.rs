//! Totals line and status bar

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

const HINTS: &str = " ?:Help  q:Quit ";

/// Render the live totals of the visible rows
pub fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let totals = app.totals();
    let style = if totals.total.is_negative() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let line = Line::from(Span::styled(
        format!(" {}", totals.format_inline()),
        style.add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let file_name = app
        .ledger
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.ledger.path().display().to_string());

    let mut spans = vec![
        Span::styled(
            format!(" {}", file_name),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if app.ledger.is_dirty() {
        spans.push(Span::styled(" [+]", Style::default().fg(Color::Yellow)));
    }

    spans.push(Span::raw(" │ "));
    spans.push(Span::raw(format!(
        "{}/{} rows",
        app.visible.len(),
        app.ledger.len()
    )));

    if app.filter.is_active() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("filter: {}", app.filter.describe()),
            Style::default().fg(Color::Magenta),
        ));
    }
    if !app.marked.is_empty() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{} marked", app.marked.len()),
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(message) = &app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(left_len + HINTS.len());
    spans.push(Span::raw(" ".repeat(padding.max(1))));
    spans.push(Span::styled(HINTS, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
