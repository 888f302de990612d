//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer.

pub mod expense;
pub mod file;
pub mod report;
pub mod settings;

use std::path::PathBuf;

use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::services::ExpenseService;
use crate::storage::{Ledger, LoadMode, LoadReport};

pub use expense::{handle_expense_command, ExpenseCommands};
pub use file::{handle_file_command, FileCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};

/// Everything a ledger command needs: settings, the opened ledger and the
/// audit log
pub struct Session {
    pub paths: ExpensePaths,
    pub settings: Settings,
    pub ledger: Ledger,
    pub audit: AuditLogger,
    pub load_mode: LoadMode,
}

impl Session {
    /// Open the ledger at `file` (or the configured default)
    pub fn open(
        paths: ExpensePaths,
        settings: Settings,
        file: Option<PathBuf>,
        load_mode: LoadMode,
    ) -> ExpenseResult<Self> {
        let ledger_path = settings.ledger_path(&paths, file);
        let (ledger, report) = Ledger::open(ledger_path, load_mode, &settings.default_category)?;
        report_skipped(&report);

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            paths,
            settings,
            ledger,
            load_mode,
        })
    }

    /// Bind to the ledger path without reading it
    ///
    /// Used by `load`, which replaces the contents anyway and must work even
    /// when the current file is unreadable.
    pub fn unopened(
        paths: ExpensePaths,
        settings: Settings,
        file: Option<PathBuf>,
        load_mode: LoadMode,
    ) -> Self {
        let ledger = Ledger::new(settings.ledger_path(&paths, file));
        Self {
            audit: AuditLogger::new(paths.audit_log()),
            paths,
            settings,
            ledger,
            load_mode,
        }
    }

    pub fn service(&mut self) -> ExpenseService<'_> {
        ExpenseService::new(&mut self.ledger, &self.settings).with_audit(&self.audit)
    }

    /// Write the ledger back if a command changed it
    pub fn save_if_dirty(&mut self) -> ExpenseResult<()> {
        if self.ledger.is_dirty() {
            self.service().save()?;
        }
        Ok(())
    }
}

/// Tell the user about rows a lenient load left out
pub fn report_skipped(report: &LoadReport) {
    if report.skipped.is_empty() {
        return;
    }
    eprintln!("Skipped {} malformed row(s):", report.skipped.len());
    for row in &report.skipped {
        eprintln!("  line {}: {}", row.line, row.reason);
    }
}

/// Convert 1-based row numbers from the command line to ledger positions
pub fn row_indices(rows: &[usize]) -> ExpenseResult<Vec<usize>> {
    rows.iter()
        .map(|&row| {
            row.checked_sub(1).ok_or_else(|| {
                crate::error::ExpenseError::Validation("Row numbers start at 1".into())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_indices() {
        assert_eq!(row_indices(&[1, 3]).unwrap(), vec![0, 2]);
        assert!(row_indices(&[0]).unwrap_err().is_validation());
    }
}
