//! Expense list formatting for terminal output

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::models::Expense;
use crate::reports::CategoryTotals;

/// Format expenses as a table
///
/// The `#` column is the 1-based ledger row, the number `edit` and `delete`
/// take.
pub fn format_expense_table(rows: &[(usize, &Expense)]) -> String {
    if rows.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Date", "Category", "Amount", "Description"]);
    for (index, expense) in rows {
        builder.push_record([
            (index + 1).to_string(),
            expense.date.format("%Y-%m-%d").to_string(),
            expense.category.clone(),
            expense.amount.to_string(),
            expense.description.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::psql())
        .modify(Columns::single(0), Alignment::right())
        .modify(Columns::single(3), Alignment::right());
    table.to_string()
}

/// Format the totals block printed under a listing
pub fn format_totals(totals: &CategoryTotals) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} ({} expenses)\n", totals.total_line(), totals.count));
    for (category, amount) in &totals.by_category {
        output.push_str(&format!("  {:<20} {:>12}\n", category, amount));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_table_uses_ledger_row_numbers() {
        let lunch = Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            "Food",
            Money::from_cents(500),
            "Lunch",
        );
        let output = format_expense_table(&[(6, &lunch)]);

        assert!(output.contains("Description"));
        assert!(output.contains(" 7 "));
        assert!(output.contains("2025-01-20"));
        assert!(output.contains("5.00"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_expense_table(&[]), "No expenses found.");
    }

    #[test]
    fn test_totals_block() {
        let lunch = Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            "Food",
            Money::from_cents(500),
            "",
        );
        let output = format_totals(&CategoryTotals::generate([&lunch]));
        assert!(output.starts_with("Total: 5.00 (1 expenses)"));
        assert!(output.contains("Food"));
    }
}
