//! The in-memory expense ledger
//!
//! Holds the ordered expense collection together with the CSV path it is
//! bound to. Rows are addressed by position in insertion order.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::info;

use super::csv_io::{read_expenses_file, write_expenses_file, LoadMode, LoadReport};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Ordered expense collection bound to a CSV file
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    expenses: Vec<Expense>,
    dirty: bool,
}

impl Ledger {
    /// Create an empty ledger bound to `path` (nothing is read)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            expenses: Vec::new(),
            dirty: false,
        }
    }

    /// Open the ledger at `path`, loading it if the file exists
    ///
    /// A missing file yields an empty ledger; any other failure is returned.
    pub fn open(
        path: impl Into<PathBuf>,
        mode: LoadMode,
        default_category: &str,
    ) -> ExpenseResult<(Self, LoadReport)> {
        let mut ledger = Self::new(path);
        if !ledger.path.exists() {
            return Ok((ledger, LoadReport::default()));
        }

        let report = read_expenses_file(&ledger.path, mode, default_category)?;
        ledger.expenses = report.expenses.clone();
        info!(
            path = %ledger.path.display(),
            rows = ledger.expenses.len(),
            "opened ledger"
        );
        Ok((ledger, report))
    }

    /// The CSV file this ledger saves to
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    /// Whether there are changes not yet written to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append an expense, returning its position
    pub fn push(&mut self, expense: Expense) -> usize {
        self.expenses.push(expense);
        self.dirty = true;
        self.expenses.len() - 1
    }

    /// Replace the expense at `index`, returning the previous value
    pub fn replace(&mut self, index: usize, expense: Expense) -> ExpenseResult<Expense> {
        let slot = self
            .expenses
            .get_mut(index)
            .ok_or_else(|| ExpenseError::expense_not_found(format!("row {}", index + 1)))?;
        self.dirty = true;
        Ok(std::mem::replace(slot, expense))
    }

    /// Remove the rows at `indices`
    ///
    /// Duplicate indices are ignored. If any index is out of range nothing is
    /// removed. Returns the removed rows with their former positions, in
    /// ascending order.
    pub fn remove_many(&mut self, indices: &[usize]) -> ExpenseResult<Vec<(usize, Expense)>> {
        let unique: BTreeSet<usize> = indices.iter().copied().collect();
        if let Some(bad) = unique.iter().find(|&&i| i >= self.expenses.len()) {
            return Err(ExpenseError::expense_not_found(format!("row {}", bad + 1)));
        }

        let mut removed: Vec<(usize, Expense)> = unique
            .iter()
            .rev()
            .map(|&i| (i, self.expenses.remove(i)))
            .collect();
        removed.reverse();

        if !removed.is_empty() {
            self.dirty = true;
        }
        Ok(removed)
    }

    /// Replace the whole collection
    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
        self.dirty = false;
    }

    /// Write the ledger to its bound path
    pub fn save(&mut self) -> ExpenseResult<()> {
        write_expenses_file(&self.path, &self.expenses)?;
        self.dirty = false;
        Ok(())
    }

    /// Write the ledger to a new path and bind to it
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> ExpenseResult<()> {
        let path = path.into();
        write_expenses_file(&path, &self.expenses)?;
        self.path = path;
        self.dirty = false;
        Ok(())
    }

    /// Iterate rows with their positions
    pub fn iter_indexed(&self) -> impl Iterator<Item = (usize, &Expense)> {
        self.expenses.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn expense(day: u32, cents: i64) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            "Food",
            Money::from_cents(cents),
            format!("day {}", day),
        )
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let (ledger, report) =
            Ledger::open(temp_dir.path().join("none.csv"), LoadMode::Strict, "Other").unwrap();
        assert!(ledger.is_empty());
        assert!(report.skipped.is_empty());
        assert!(!ledger.is_dirty());
    }

    #[test]
    fn test_push_and_replace() {
        let mut ledger = Ledger::new("x.csv");
        assert_eq!(ledger.push(expense(1, 100)), 0);
        assert_eq!(ledger.push(expense(2, 200)), 1);
        assert!(ledger.is_dirty());

        let old = ledger.replace(1, expense(3, 300)).unwrap();
        assert_eq!(old, expense(2, 200));
        assert_eq!(ledger.get(1), Some(&expense(3, 300)));

        assert!(ledger.replace(5, expense(4, 400)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_many_keeps_order() {
        let mut ledger = Ledger::new("x.csv");
        for day in 1..=5 {
            ledger.push(expense(day, day as i64 * 100));
        }

        let removed = ledger.remove_many(&[3, 1, 3]).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].0, 1);
        assert_eq!(removed[1].0, 3);

        let days: Vec<String> = ledger.expenses().iter().map(|e| e.description.clone()).collect();
        assert_eq!(days, vec!["day 1", "day 3", "day 5"]);
    }

    #[test]
    fn test_remove_many_out_of_range_removes_nothing() {
        let mut ledger = Ledger::new("x.csv");
        ledger.push(expense(1, 100));
        ledger.push(expense(2, 200));

        assert!(ledger.remove_many(&[0, 9]).is_err());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_save_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");

        let mut ledger = Ledger::new(&path);
        ledger.push(expense(1, 100));
        ledger.push(expense(2, -250));
        ledger.save().unwrap();
        assert!(!ledger.is_dirty());

        let (reopened, _) = Ledger::open(&path, LoadMode::Strict, "Other").unwrap();
        assert_eq!(reopened.expenses(), ledger.expenses());
    }

    #[test]
    fn test_save_as_rebinds_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = Ledger::new(temp_dir.path().join("a.csv"));
        ledger.push(expense(1, 100));

        let target = temp_dir.path().join("b.csv");
        ledger.save_as(&target).unwrap();

        assert_eq!(ledger.path(), target.as_path());
        assert!(target.exists());
        assert!(!temp_dir.path().join("a.csv").exists());
    }
}
