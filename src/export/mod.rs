//! Export of the monthly summary
//!
//! - CSV: `YearMonth,Total,<category...>` for spreadsheets
//! - JSON: machine-readable, with schema version and metadata
//! - YAML: human-readable form of the JSON document

pub mod json;
pub mod yaml;

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::error::ExpenseResult;
use crate::reports::MonthlySummary;
use crate::storage::file_io::write_atomic;

pub use json::{export_summary_json, MonthExport, SummaryExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_summary_yaml;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Spreadsheet-compatible CSV
    #[default]
    Csv,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Csv,
        }
    }
}

/// Write `summary` in `format`
pub fn export_summary<W: Write>(
    summary: &MonthlySummary,
    format: ExportFormat,
    writer: &mut W,
) -> ExpenseResult<()> {
    match format {
        ExportFormat::Csv => summary.export_csv(writer),
        ExportFormat::Json => export_summary_json(summary, writer, true),
        ExportFormat::Yaml => export_summary_yaml(summary, writer),
    }
}

/// Write `summary` to a file, replacing it atomically
pub fn export_summary_file(
    summary: &MonthlySummary,
    format: ExportFormat,
    path: &Path,
) -> ExpenseResult<()> {
    write_atomic(path, |writer| export_summary(summary, format, writer))?;
    info!(path = %path.display(), ?format, months = summary.rows().len(), "exported summary");
    Ok(())
}
