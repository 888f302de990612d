//! Expense Tracker - personal expense records in plain CSV files
//!
//! This library provides the core functionality for the `expense` binary:
//! entering and editing expense records, loading and saving them as CSV,
//! filtering, live category totals, and a monthly summary rollup.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and logging setup
//! - `error`: Custom error types
//! - `models`: Core data models (expense, money, year-month, dates)
//! - `storage`: The in-memory ledger and its CSV persistence
//! - `services`: Business logic layer (entry validation, filtering)
//! - `reports`: Monthly summary and category totals
//! - `export`: Summary export as CSV, JSON or YAML
//! - `audit`: Audit logging system
//! - `display`: Table formatting for the command line
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::display::format_summary_table;
//! use expense_tracker::reports::MonthlySummary;
//! use expense_tracker::storage::{Ledger, LoadMode};
//!
//! let (ledger, _) = Ledger::open("expenses.csv", LoadMode::Strict, "Other")?;
//! println!("{}", format_summary_table(&MonthlySummary::generate(ledger.expenses())));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};
