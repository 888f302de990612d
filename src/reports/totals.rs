//! Live totals for the current view

use std::collections::BTreeMap;

use crate::models::{Expense, Money};

/// Grand total and per-category totals of a set of expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub total: Money,
    /// Largest total first; equal totals ordered by name
    pub by_category: Vec<(String, Money)>,
    pub count: usize,
}

impl CategoryTotals {
    pub fn generate<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        let mut sums: BTreeMap<&str, Money> = BTreeMap::new();
        let mut total = Money::zero();
        let mut count = 0;

        for expense in expenses {
            *sums.entry(expense.category.as_str()).or_default() += expense.amount;
            total += expense.amount;
            count += 1;
        }

        let mut by_category: Vec<(String, Money)> = sums
            .into_iter()
            .map(|(name, amount)| (name.to_string(), amount))
            .collect();
        // BTreeMap order already breaks ties by name
        by_category.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            total,
            by_category,
            count,
        }
    }

    pub fn total_line(&self) -> String {
        format!("Total: {}", self.total)
    }

    pub fn category_line(&self) -> String {
        if self.by_category.is_empty() {
            return "By Category: -".to_string();
        }
        let parts: Vec<String> = self
            .by_category
            .iter()
            .map(|(name, amount)| format!("{}: {}", name, amount))
            .collect();
        format!("By Category: {}", parts.join(", "))
    }

    /// Single-line status text
    pub fn format_inline(&self) -> String {
        format!("{} | {}", self.total_line(), self.category_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(cents: i64, category: &str) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            category,
            Money::from_cents(cents),
            "",
        )
    }

    #[test]
    fn test_sorted_descending_with_name_ties() {
        let expenses = vec![
            expense(500, "Travel"),
            expense(1500, "Food"),
            expense(500, "Bills"),
            expense(250, "Travel"),
        ];
        let totals = CategoryTotals::generate(&expenses);

        assert_eq!(totals.total, Money::from_cents(2750));
        assert_eq!(totals.count, 4);
        let names: Vec<&str> = totals.by_category.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Food", "Travel", "Bills"]);
        assert_eq!(
            totals.format_inline(),
            "Total: 27.50 | By Category: Food: 15.00, Travel: 7.50, Bills: 5.00"
        );
    }

    #[test]
    fn test_categories_sum_to_total() {
        let expenses = vec![expense(-300, "Refund"), expense(1000, "Food"), expense(1, "x")];
        let totals = CategoryTotals::generate(&expenses);
        let sum: Money = totals.by_category.iter().map(|(_, m)| *m).sum();
        assert_eq!(sum, totals.total);
    }

    #[test]
    fn test_empty_view() {
        let none: Vec<Expense> = Vec::new();
        let totals = CategoryTotals::generate(&none);
        assert_eq!(totals.format_inline(), "Total: 0.00 | By Category: -");
    }
}
