//! Expense model
//!
//! A single user-entered expense: when, how much, which category, and a
//! free-text description.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::year_month::YearMonth;

/// Column names the monthly summary places before the category columns
pub const RESERVED_CATEGORY_NAMES: [&str; 2] = ["YearMonth", "Total"];

/// Whether `name` matches a fixed summary column, ignoring case
pub fn is_reserved_category(name: &str) -> bool {
    RESERVED_CATEGORY_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name.trim()))
}

/// One expense record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expense {
    /// Date the expense was incurred
    pub date: NaiveDate,

    /// Short category label (e.g. "Food")
    pub category: String,

    /// Signed amount
    pub amount: Money,

    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    /// The calendar month this expense belongs to
    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount
        )?;
        if !self.description.is_empty() {
            write!(f, " ({})", self.description)?;
        }
        Ok(())
    }
}
