//! Expense service
//!
//! Business logic over the ledger: parsing and validating entry input,
//! add/edit/delete with audit logging, filtered listing, and whole-file
//! load and save.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use super::filter::ExpenseFilter;
use crate::audit::{generate_diff, AuditEntry, AuditLogger, Operation};
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    is_reserved_category, parse_flexible_date, DateParseError, Expense, Money, MoneyParseError,
};
use crate::storage::csv_io::read_expenses_file;
use crate::storage::{Ledger, LoadMode, LoadReport};

/// Validated field values for a new or edited expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Money,
    pub description: String,
}

impl ExpenseInput {
    /// Parse raw text fields from a form or the command line
    ///
    /// A blank date means today and a blank category means the configured
    /// default category. The amount is required.
    pub fn parse(
        date: &str,
        category: &str,
        amount: &str,
        description: &str,
        settings: &Settings,
    ) -> ExpenseResult<Self> {
        let date = match parse_flexible_date(date) {
            Ok(date) => date,
            Err(DateParseError::Empty) => Local::now().date_naive(),
            Err(e) => return Err(ExpenseError::Validation(e.to_string())),
        };

        let amount = Money::parse(amount).map_err(|e| match e {
            MoneyParseError::Empty => ExpenseError::Validation("Amount is required".into()),
            other => ExpenseError::Validation(other.to_string()),
        })?;

        let category = match category.trim() {
            "" => settings.default_category.clone(),
            other if is_reserved_category(other) => {
                return Err(ExpenseError::Validation(format!(
                    "'{}' is reserved for a summary column",
                    other
                )))
            }
            other => other.to_string(),
        };

        Ok(Self {
            date,
            category,
            amount,
            description: description.trim().to_string(),
        })
    }

    pub fn into_expense(self) -> Expense {
        Expense::new(self.date, self.category, self.amount, self.description)
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    ledger: &'a mut Ledger,
    settings: &'a Settings,
    audit: Option<&'a AuditLogger>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service without audit logging
    pub fn new(ledger: &'a mut Ledger, settings: &'a Settings) -> Self {
        Self {
            ledger,
            settings,
            audit: None,
        }
    }

    /// Record every mutation in `logger`
    pub fn with_audit(mut self, logger: &'a AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn ledger(&self) -> &Ledger {
        self.ledger
    }

    /// Append a new expense
    ///
    /// The audit entry is written first; if that fails the ledger is left
    /// unchanged.
    pub fn add(&mut self, input: ExpenseInput) -> ExpenseResult<Expense> {
        let expense = input.into_expense();
        let row = self.ledger.len();
        self.audit(&[AuditEntry::create(row, &expense)])?;

        self.ledger.push(expense.clone());
        info!(row, expense = %expense, "added expense");
        Ok(expense)
    }

    /// Replace the expense at `index` with new field values
    pub fn update(&mut self, index: usize, input: ExpenseInput) -> ExpenseResult<Expense> {
        let expense = input.into_expense();
        let before = self
            .ledger
            .get(index)
            .cloned()
            .ok_or_else(|| ExpenseError::expense_not_found(format!("row {}", index + 1)))?;

        let diff = match (serde_json::to_value(&before), serde_json::to_value(&expense)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit(&[AuditEntry::update(index, &before, &expense, diff.clone())])?;

        self.ledger.replace(index, expense.clone())?;
        info!(row = index, changes = ?diff, "updated expense");
        Ok(expense)
    }

    /// Remove the rows at `indices`
    ///
    /// Duplicates are ignored. If any index is unknown, or the audit entries
    /// cannot be written, nothing is removed.
    pub fn delete(&mut self, indices: &[usize]) -> ExpenseResult<Vec<Expense>> {
        let rows: BTreeSet<usize> = indices.iter().copied().collect();
        let entries = rows
            .iter()
            .map(|&row| {
                self.ledger
                    .get(row)
                    .map(|expense| AuditEntry::delete(row, expense))
                    .ok_or_else(|| ExpenseError::expense_not_found(format!("row {}", row + 1)))
            })
            .collect::<ExpenseResult<Vec<AuditEntry>>>()?;
        self.audit(&entries)?;

        let removed = self.ledger.remove_many(indices)?;
        info!(count = removed.len(), "deleted expenses");
        Ok(removed.into_iter().map(|(_, e)| e).collect())
    }

    /// Rows matching `filter` with their ledger positions
    pub fn list(&self, filter: &ExpenseFilter) -> Vec<(usize, &Expense)> {
        self.ledger
            .iter_indexed()
            .filter(|(_, e)| filter.matches(e))
            .collect()
    }

    /// Replace the whole ledger with the contents of `path`
    ///
    /// On any error, including a failed audit write, the current ledger is
    /// left untouched.
    pub fn load(&mut self, path: impl Into<PathBuf>, mode: LoadMode) -> ExpenseResult<LoadReport> {
        let path = path.into();
        let report = read_expenses_file(&path, mode, &self.settings.default_category)?;

        self.audit(&[AuditEntry::file(
            Operation::Load,
            format!(
                "{} ({} rows, {} skipped)",
                path.display(),
                report.expenses.len(),
                report.skipped.len()
            ),
        )])?;

        self.ledger.replace_all(report.expenses.clone());
        self.ledger.set_path(&path);

        if !report.skipped.is_empty() {
            warn!(
                path = %path.display(),
                skipped = report.skipped.len(),
                "loaded ledger with skipped rows"
            );
        }
        info!(path = %path.display(), rows = report.expenses.len(), "loaded ledger");
        Ok(report)
    }

    /// Write the ledger to its bound path
    pub fn save(&mut self) -> ExpenseResult<PathBuf> {
        self.ledger.save()?;
        self.after_save()
    }

    /// Write the ledger to `path` and bind to it
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> ExpenseResult<PathBuf> {
        self.ledger.save_as(path)?;
        self.after_save()
    }

    fn after_save(&self) -> ExpenseResult<PathBuf> {
        let path = self.ledger.path().to_path_buf();
        info!(path = %path.display(), rows = self.ledger.len(), "saved ledger");
        let entry = AuditEntry::file(
            Operation::Save,
            format!("{} ({} rows)", path.display(), self.ledger.len()),
        );
        // the ledger file is written at this point
        if let Err(e) = self.audit(&[entry]) {
            warn!(error = %e, "failed to record save in audit log");
        }
        Ok(path)
    }

    fn audit(&self, entries: &[AuditEntry]) -> ExpenseResult<()> {
        match self.audit {
            Some(logger) => logger.log_batch(entries),
            None => Ok(()),
        }
    }
}
