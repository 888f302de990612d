//! Monthly Summary
//!
//! Rolls the expense collection up into one row per calendar month with a
//! column per category and a total column.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use csv::{Terminator, WriterBuilder};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money, YearMonth, RESERVED_CATEGORY_NAMES};

/// One month of the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRow {
    /// The calendar month
    pub month: YearMonth,
    /// Sum per category; categories with no expenses this month are absent
    pub amounts: BTreeMap<String, Money>,
    /// Sum of every expense in the month
    pub total: Money,
    /// Number of expenses in the month
    pub count: usize,
}

impl MonthlyRow {
    /// Sum for `category`, zero when the month has none
    pub fn amount(&self, category: &str) -> Money {
        self.amounts.get(category).copied().unwrap_or_default()
    }
}

/// Monthly rollup of an expense collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlySummary {
    rows: Vec<MonthlyRow>,
    categories: Vec<String>,
}

impl MonthlySummary {
    /// Build the summary; rows are ascending by month, categories alphabetical
    pub fn generate(expenses: &[Expense]) -> Self {
        let mut months: BTreeMap<YearMonth, MonthlyRow> = BTreeMap::new();
        let mut categories = BTreeSet::new();

        for expense in expenses {
            let month = expense.year_month();
            let row = months.entry(month).or_insert_with(|| MonthlyRow {
                month,
                amounts: BTreeMap::new(),
                total: Money::zero(),
                count: 0,
            });

            *row.amounts.entry(expense.category.clone()).or_default() += expense.amount;
            row.total += expense.amount;
            row.count += 1;
            categories.insert(expense.category.clone());
        }

        Self {
            rows: months.into_values().collect(),
            categories: categories.into_iter().collect(),
        }
    }

    pub fn rows(&self) -> &[MonthlyRow] {
        &self.rows
    }

    /// Category column names, in column order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn row(&self, month: YearMonth) -> Option<&MonthlyRow> {
        self.rows
            .binary_search_by(|r| r.month.cmp(&month))
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Cell value; missing month or category is zero
    pub fn get(&self, month: YearMonth, category: &str) -> Money {
        self.row(month)
            .map(|r| r.amount(category))
            .unwrap_or_default()
    }

    /// Column total across all months
    pub fn category_total(&self, category: &str) -> Money {
        self.rows.iter().map(|r| r.amount(category)).sum()
    }

    pub fn grand_total(&self) -> Money {
        self.rows.iter().map(|r| r.total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Export as CSV: `YearMonth,Total,<category...>`, one row per month
    ///
    /// A category whose name clashes with an earlier column gets a
    /// ` (category)` suffix in the header.
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv_writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        let mut header: Vec<String> =
            RESERVED_CATEGORY_NAMES.iter().map(|c| c.to_string()).collect();
        for category in &self.categories {
            let mut name = category.clone();
            while header.iter().any(|h| h.eq_ignore_ascii_case(&name)) {
                name.push_str(" (category)");
            }
            header.push(name);
        }
        csv_writer
            .write_record(&header)
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        for row in &self.rows {
            let mut record = vec![row.month.to_string(), row.total.to_string()];
            record.extend(self.categories.iter().map(|c| row.amount(c).to_string()));
            csv_writer
                .write_record(&record)
                .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(y: i32, m: u32, d: u32, cents: i64, category: &str) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category,
            Money::from_cents(cents),
            "",
        )
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(2025, 1, 5, 1000, "food"),
            expense(2025, 1, 20, 500, "food"),
            expense(2025, 2, 1, 2000, "rent"),
        ]
    }

    #[test]
    fn test_two_month_example() {
        let summary = MonthlySummary::generate(&sample());

        assert_eq!(summary.categories(), ["food", "rent"]);
        assert_eq!(summary.rows().len(), 2);

        assert_eq!(summary.get(ym(2025, 1), "food"), Money::from_cents(1500));
        assert_eq!(summary.get(ym(2025, 1), "rent"), Money::zero());
        assert_eq!(summary.get(ym(2025, 2), "food"), Money::zero());
        assert_eq!(summary.get(ym(2025, 2), "rent"), Money::from_cents(2000));

        assert_eq!(summary.row(ym(2025, 1)).unwrap().total, Money::from_cents(1500));
        assert_eq!(summary.row(ym(2025, 1)).unwrap().count, 2);
        assert_eq!(summary.grand_total(), Money::from_cents(3500));
    }

    #[test]
    fn test_empty_input() {
        let summary = MonthlySummary::generate(&[]);
        assert!(summary.is_empty());
        assert!(summary.categories().is_empty());
        assert_eq!(summary.grand_total(), Money::zero());
    }

    #[test]
    fn test_one_row_per_month_sorted() {
        let expenses = vec![
            expense(2025, 3, 1, 100, "a"),
            expense(2024, 12, 31, 100, "b"),
            expense(2025, 3, 31, 100, "a"),
            expense(2025, 1, 1, 100, "c"),
        ];
        let summary = MonthlySummary::generate(&expenses);

        let months: Vec<String> = summary.rows().iter().map(|r| r.month.to_string()).collect();
        assert_eq!(months, vec!["2024-12", "2025-01", "2025-03"]);
        assert!(summary.row(ym(2025, 2)).is_none());
    }

    #[test]
    fn test_sum_is_order_independent() {
        let mut expenses = vec![
            expense(2025, 1, 1, 10, "x"),
            expense(2025, 1, 2, 20, "x"),
            expense(2025, 1, 3, -5, "x"),
            expense(2025, 1, 4, 1, "x"),
        ];
        let forward = MonthlySummary::generate(&expenses);
        expenses.reverse();
        let backward = MonthlySummary::generate(&expenses);

        assert_eq!(forward, backward);
        assert_eq!(forward.get(ym(2025, 1), "x"), Money::from_cents(26));
    }

    #[test]
    fn test_category_totals_sum_to_grand_total() {
        let summary = MonthlySummary::generate(&sample());
        let by_category: Money = summary
            .categories()
            .iter()
            .map(|c| summary.category_total(c))
            .sum();
        assert_eq!(by_category, summary.grand_total());
    }

    #[test]
    fn test_export_csv() {
        let summary = MonthlySummary::generate(&sample());
        let mut out = Vec::new();
        summary.export_csv(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "YearMonth,Total,food,rent\n2025-01,15.00,15.00,0.00\n2025-02,20.00,0.00,20.00\n"
        );
    }

    #[test]
    fn test_export_csv_header_names_are_unique() {
        let expenses = vec![
            expense(2025, 1, 5, 100, "Total"),
            expense(2025, 1, 6, 200, "food"),
        ];
        let mut out = Vec::new();
        MonthlySummary::generate(&expenses).export_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next(), Some("YearMonth,Total,Total (category),food"));
        assert!(text.contains("2025-01,3.00,1.00,2.00"));
    }

    #[test]
    fn test_largest_amounts_sum_exactly() {
        let big = Money::parse("1000000000000").unwrap();
        let expenses = vec![
            expense(2025, 1, 5, big.cents(), "rent"),
            expense(2025, 1, 6, big.cents(), "rent"),
        ];
        let summary = MonthlySummary::generate(&expenses);

        assert_eq!(summary.get(ym(2025, 1), "rent").cents(), 2 * big.cents());
        assert_eq!(summary.grand_total().cents(), 2 * big.cents());
    }
}
