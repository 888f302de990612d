//! CSV reading and writing for the expense ledger
//!
//! Files are written with the header `date,amount,category,description`,
//! ISO dates and two-decimal amounts. On read, header names are matched
//! case-insensitively in any order, so files with a `Date,Category,Amount,
//! Description` layout load as well. Extra columns are ignored.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use tracing::{debug, warn};

use super::file_io::write_atomic;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_flexible_date, Expense, Money, ISO_DATE_FORMAT};

/// Header written to every ledger file
pub const CSV_HEADER: [&str; 4] = ["date", "amount", "category", "description"];

/// How malformed rows are treated while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// The first malformed row aborts the load
    #[default]
    Strict,
    /// Malformed rows are skipped and reported
    SkipInvalid,
}

/// A row that was left out of a lenient load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file (the header is line 1)
    pub line: u64,
    pub reason: String,
}

/// Result of reading a ledger file
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub expenses: Vec<Expense>,
    pub skipped: Vec<SkippedRow>,
}

/// Positions of the known columns within a file's header
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    amount: usize,
    category: Option<usize>,
    description: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> ExpenseResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };

        let missing: Vec<&str> = ["date", "amount"]
            .into_iter()
            .filter(|name| find(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ExpenseError::Csv(format!(
                "CSV missing columns: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            date: find("date").unwrap_or_default(),
            amount: find("amount").unwrap_or_default(),
            category: find("category"),
            description: find("description"),
        })
    }

    fn parse_row(&self, record: &StringRecord, default_category: &str) -> Result<Expense, String> {
        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("").trim();

        let date = parse_flexible_date(cell(Some(self.date))).map_err(|e| e.to_string())?;
        let amount = Money::parse(cell(Some(self.amount))).map_err(|e| e.to_string())?;

        let category = match cell(self.category) {
            "" => default_category.to_string(),
            other => other.to_string(),
        };

        Ok(Expense::new(date, category, amount, cell(self.description)))
    }
}

/// Read expenses from CSV data
pub fn read_expenses<R: Read>(
    reader: R,
    mode: LoadMode,
    default_category: &str,
) -> ExpenseResult<LoadReport> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;
    let mut report = LoadReport::default();

    for (index, result) in csv_reader.records().enumerate() {
        let fallback_line = index as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), ErrorKind::Utf8 { .. }) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                reject_row(&mut report, mode, line, "row is not valid UTF-8".to_string())?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let line = record.position().map_or(fallback_line, |p| p.line());

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        match columns.parse_row(&record, default_category) {
            Ok(expense) => report.expenses.push(expense),
            Err(message) => reject_row(&mut report, mode, line, message)?,
        }
    }

    Ok(report)
}

/// Abort the load or record the row as skipped, depending on `mode`
fn reject_row(
    report: &mut LoadReport,
    mode: LoadMode,
    line: u64,
    message: String,
) -> ExpenseResult<()> {
    match mode {
        LoadMode::Strict => Err(ExpenseError::Import { line, message }),
        LoadMode::SkipInvalid => {
            warn!(line, reason = %message, "skipping malformed CSV row");
            report.skipped.push(SkippedRow {
                line,
                reason: message,
            });
            Ok(())
        }
    }
}

/// Read expenses from a CSV file on disk
pub fn read_expenses_file(
    path: &Path,
    mode: LoadMode,
    default_category: &str,
) -> ExpenseResult<LoadReport> {
    let file = File::open(path)
        .map_err(|e| ExpenseError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let report = read_expenses(file, mode, default_category)?;
    debug!(
        path = %path.display(),
        loaded = report.expenses.len(),
        skipped = report.skipped.len(),
        "read ledger CSV"
    );
    Ok(report)
}

/// Write expenses as CSV
pub fn write_expenses<W: Write>(writer: W, expenses: &[Expense]) -> ExpenseResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for expense in expenses {
        csv_writer.write_record([
            expense.date.format(ISO_DATE_FORMAT).to_string(),
            expense.amount.to_string(),
            expense.category.clone(),
            expense.description.clone(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Csv(format!("Failed to flush CSV: {}", e)))
}

/// Write expenses to a CSV file atomically
pub fn write_expenses_file(path: &Path, expenses: &[Expense]) -> ExpenseResult<()> {
    write_atomic(path, |writer| write_expenses(writer, expenses))?;
    debug!(path = %path.display(), rows = expenses.len(), "wrote ledger CSV");
    Ok(())
}
