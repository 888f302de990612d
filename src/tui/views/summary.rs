//! Monthly summary view

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Money;
use crate::tui::app::App;

const MONTH_WIDTH: u16 = 9;
const AMOUNT_WIDTH: u16 = 12;

/// Render the monthly rollup of the whole ledger
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.summary();
    let block = Block::default()
        .title(" Monthly Summary ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if summary.is_empty() {
        let text = Paragraph::new("No expenses to summarize.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let amount = |m: Money| Cell::from(format!("{:>11}", m));
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut header_cells = vec![
        Cell::from("Month").style(bold),
        Cell::from(format!("{:>11}", "Total")).style(bold),
    ];
    header_cells.extend(
        summary
            .categories()
            .iter()
            .map(|c| Cell::from(format!("{:>11}", c)).style(bold)),
    );
    let header = Row::new(header_cells).style(Style::default().fg(Color::Yellow));

    let mut rows: Vec<Row> = summary
        .rows()
        .iter()
        .skip(app.summary_scroll)
        .map(|row| {
            let mut cells = vec![
                Cell::from(row.month.to_string()),
                amount(row.total).style(bold),
            ];
            cells.extend(summary.categories().iter().map(|c| amount(row.amount(c))));
            Row::new(cells)
        })
        .collect();

    let mut total_cells = vec![Cell::from("TOTAL"), amount(summary.grand_total())];
    total_cells.extend(
        summary
            .categories()
            .iter()
            .map(|c| amount(summary.category_total(c))),
    );
    rows.push(
        Row::new(total_cells)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .top_margin(1),
    );

    let mut widths = vec![
        Constraint::Length(MONTH_WIDTH),
        Constraint::Length(AMOUNT_WIDTH),
    ];
    widths.extend(
        summary
            .categories()
            .iter()
            .map(|_| Constraint::Length(AMOUNT_WIDTH)),
    );

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
