//! Display formatting for terminal output
//!
//! Table rendering for the command line: expense listings, totals and the
//! monthly summary.

pub mod expense;
pub mod summary;

pub use expense::{format_expense_table, format_totals};
pub use summary::format_summary_table;
