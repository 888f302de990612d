//! Expense table view
//!
//! Rows matching the active filter, with marks for multi-row delete

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::App;

/// Render the expense table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.filter.is_active() {
        format!(" Expenses - filter: {} ", app.filter.describe())
    } else {
        " Expenses ".to_string()
    };
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.visible.is_empty() {
        let hint = if app.ledger.is_empty() {
            "No expenses. Press 'a' to add one or 'o' to load a CSV."
        } else {
            "No expenses match the filter. Press 'c' to clear it."
        };
        let text = Paragraph::new(hint)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(1),  // Mark
        Constraint::Length(5),  // Row
        Constraint::Length(12), // Date
        Constraint::Length(16), // Category
        Constraint::Length(12), // Amount
        Constraint::Min(10),    // Description
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("#").style(bold),
        Cell::from("Date").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Amount").style(bold),
        Cell::from("Description").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = app
        .visible
        .iter()
        .filter_map(|&row| app.ledger.get(row).map(|e| (row, e)))
        .map(|(row, expense)| {
            let marked = app.marked.contains(&row);
            let amount_style = if expense.amount.is_negative() {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            let cells = vec![
                Cell::from(if marked { "■" } else { " " }).style(Style::default().fg(Color::Magenta)),
                Cell::from(format!("{}", row + 1)).style(Style::default().fg(Color::DarkGray)),
                Cell::from(app.settings.format_date(expense.date)),
                Cell::from(truncate_string(&expense.category, 16)),
                Cell::from(format!(
                    "{:>11}",
                    expense.amount.format_with_symbol(&app.settings.currency_symbol)
                ))
                .style(amount_style),
                Cell::from(expense.description.clone()),
            ];

            if marked {
                Row::new(cells).style(Style::default().fg(Color::Magenta))
            } else {
                Row::new(cells)
            }
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Truncate to at most `max_len` characters, marking the cut with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Food", 16), "Food");
        assert_eq!(truncate_string("Entertainment", 6), "Enter…");
        assert_eq!(truncate_string("Café crème", 5), "Café…");
    }
}
