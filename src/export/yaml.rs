//! YAML export of the monthly summary

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::SummaryExport;
use crate::reports::MonthlySummary;

/// Write the summary as YAML, preceded by a comment header
pub fn export_summary_yaml<W: Write>(summary: &MonthlySummary, writer: &mut W) -> ExpenseResult<()> {
    let export = SummaryExport::from_summary(summary);
    let err = |e: std::io::Error| ExpenseError::Export(e.to_string());

    writeln!(writer, "# Expense Tracker Monthly Summary").map_err(err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))
}
