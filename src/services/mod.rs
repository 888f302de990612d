//! Service layer for the expense tracker
//!
//! Business logic on top of the ledger: input validation, mutations with
//! audit logging, and filtered views.

pub mod expense;
pub mod filter;

pub use expense::{ExpenseInput, ExpenseService};
pub use filter::ExpenseFilter;
