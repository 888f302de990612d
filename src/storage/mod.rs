//! Storage layer for the expense tracker
//!
//! Provides CSV persistence for the ledger, atomic file writes, and JSON
//! helpers for settings.

pub mod csv_io;
pub mod file_io;
pub mod ledger;

pub use csv_io::{LoadMode, LoadReport, SkippedRow};
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use ledger::Ledger;
