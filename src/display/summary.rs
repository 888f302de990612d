//! Monthly summary formatting for terminal output

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::reports::MonthlySummary;

/// Format the monthly summary as a table with a closing TOTAL row
pub fn format_summary_table(summary: &MonthlySummary) -> String {
    if summary.is_empty() {
        return "No expenses to summarize.".to_string();
    }

    let mut header = vec!["Month".to_string()];
    header.extend(summary.categories().iter().cloned());
    header.push("Total".to_string());

    let mut builder = Builder::default();
    builder.push_record(header);

    for row in summary.rows() {
        let mut record = vec![row.month.to_string()];
        record.extend(summary.categories().iter().map(|c| row.amount(c).to_string()));
        record.push(row.total.to_string());
        builder.push_record(record);
    }

    let mut totals = vec!["TOTAL".to_string()];
    totals.extend(
        summary
            .categories()
            .iter()
            .map(|c| summary.category_total(c).to_string()),
    );
    totals.push(summary.grand_total().to_string());
    builder.push_record(totals);

    let mut table = builder.build();
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}
