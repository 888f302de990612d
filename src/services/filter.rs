//! Expense view filtering
//!
//! A filter selects ledger rows by an inclusive date range and an exact
//! category. The result is a list of row positions so callers can act on the
//! underlying records.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_optional_date, Expense, ISO_DATE_FORMAT};

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Options for filtering expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// First date included
    pub from: Option<NaiveDate>,
    /// Last date included
    pub to: Option<NaiveDate>,
    /// Exact category match
    pub category: Option<String>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    /// Filter by category; blank or "All" clears the category filter
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let trimmed = category.trim();
        self.category = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Build a filter from raw text fields
    ///
    /// Blank dates leave that bound open.
    pub fn parse(from: &str, to: &str, category: &str) -> ExpenseResult<Self> {
        let from = parse_optional_date(from)
            .map_err(|e| ExpenseError::Validation(format!("From date: {}", e)))?;
        let to = parse_optional_date(to)
            .map_err(|e| ExpenseError::Validation(format!("To date: {}", e)))?;

        let filter = Self {
            from,
            to,
            category: None,
        }
        .category(category);
        filter.validate()?;
        Ok(filter)
    }

    /// Reject a range whose start is after its end
    pub fn validate(&self) -> ExpenseResult<()> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(ExpenseError::Validation(format!(
                "From date {} is after To date {}",
                from.format(ISO_DATE_FORMAT),
                to.format(ISO_DATE_FORMAT)
            ))),
            _ => Ok(()),
        }
    }

    /// Whether any criterion is set
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.category.is_some()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if self.from.is_some_and(|from| expense.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| expense.date > to) {
            return false;
        }
        match &self.category {
            Some(category) => &expense.category == category,
            None => true,
        }
    }

    /// Positions of the matching rows, in ledger order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<usize> {
        expenses
            .iter()
            .enumerate()
            .filter(|(_, e)| self.matches(e))
            .map(|(i, _)| i)
            .collect()
    }

    /// Short description for status lines, e.g. `2025-01-01..2025-01-31 Food`
    pub fn describe(&self) -> String {
        if !self.is_active() {
            return "none".to_string();
        }

        let bound = |d: Option<NaiveDate>| {
            d.map(|d| d.format(ISO_DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        let mut parts = Vec::new();
        if self.from.is_some() || self.to.is_some() {
            parts.push(format!("{}..{}", bound(self.from), bound(self.to)));
        }
        if let Some(category) = &self.category {
            parts.push(category.clone());
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new(date(2025, 1, 1), "Food", Money::from_cents(100), ""),
            Expense::new(date(2025, 1, 15), "Rent", Money::from_cents(200), ""),
            Expense::new(date(2025, 1, 31), "Food", Money::from_cents(300), ""),
            Expense::new(date(2025, 2, 1), "Food", Money::from_cents(400), ""),
        ]
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = ExpenseFilter::new();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&sample()), vec![0, 1, 2, 3]);
        assert_eq!(filter.describe(), "none");
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = ExpenseFilter::new()
            .from_date(date(2025, 1, 1))
            .to_date(date(2025, 1, 31));
        assert_eq!(filter.apply(&sample()), vec![0, 1, 2]);
    }

    #[test]
    fn test_category_and_range() {
        let filter = ExpenseFilter::parse("2025-01-02", "", "Food").unwrap();
        assert_eq!(filter.apply(&sample()), vec![2, 3]);
        assert_eq!(filter.describe(), "2025-01-02.. Food");
    }

    #[test]
    fn test_all_category_means_no_filter() {
        let filter = ExpenseFilter::parse("", "", "All").unwrap();
        assert!(filter.category.is_none());
        assert!(!filter.is_active());

        let filter = ExpenseFilter::new().category("  ");
        assert!(filter.category.is_none());
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = ExpenseFilter::parse("2025-02-01", "2025-01-01", "").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_bad_date_rejected() {
        let err = ExpenseFilter::parse("31/02/2025", "", "").unwrap_err();
        assert!(err.to_string().contains("From date"));
    }
}
