//! Core data models for the expense tracker
//!
//! This module contains the data structures of the expense domain: the
//! expense record itself, money amounts, calendar months, and date parsing.

pub mod date;
pub mod expense;
pub mod money;
pub mod year_month;

pub use date::{parse_flexible_date, parse_optional_date, DateParseError, ISO_DATE_FORMAT};
pub use expense::{is_reserved_category, Expense, RESERVED_CATEGORY_NAMES};
pub use money::{Money, MoneyParseError};
pub use year_month::YearMonth;
