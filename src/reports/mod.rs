//! Reports for the expense tracker
//!
//! The monthly rollup and the live category totals shown beside the
//! expense list.

pub mod monthly;
pub mod totals;

pub use monthly::{MonthlyRow, MonthlySummary};
pub use totals::CategoryTotals;
