//! Audit logging for the expense ledger
//!
//! Records every create, update, delete, load and save in an append-only
//! log, one JSON object per line.
//!
//! - `AuditEntry`: timestamp, operation, affected row and before/after records
//! - `AuditLogger`: appends entries to the log file and reads them back
//! - `generate_diff`: field-level description of an edit
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{generate_diff, AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log_batch(&[AuditEntry::create(row, &expense)])?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
