//! CLI commands for reports
//!
//! Live totals over a filtered view, and the monthly summary with optional
//! export.

use std::path::PathBuf;

use clap::Subcommand;

use super::expense::FilterArgs;
use super::Session;
use crate::display::{format_summary_table, format_totals};
use crate::error::ExpenseResult;
use crate::export::{export_summary_file, ExportFormat};
use crate::reports::{CategoryTotals, MonthlySummary};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show the grand total and per-category totals
    Totals {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the monthly summary (one row per month, one column per category)
    Summary {
        /// Export to a file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (guessed from the file extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },
}

/// Handle a report command
pub fn handle_report_command(session: &mut Session, cmd: ReportCommands) -> ExpenseResult<()> {
    match cmd {
        ReportCommands::Totals { filter } => {
            let filter = filter.to_filter()?;
            let totals = CategoryTotals::generate(
                session
                    .ledger
                    .expenses()
                    .iter()
                    .filter(|e| filter.matches(e)),
            );
            print!("{}", format_totals(&totals));
        }

        ReportCommands::Summary { output, format } => {
            let summary = MonthlySummary::generate(session.ledger.expenses());

            match output {
                Some(path) => {
                    let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
                    export_summary_file(&summary, format, &path)?;
                    println!(
                        "Exported summary of {} month(s) to: {}",
                        summary.rows().len(),
                        path.display()
                    );
                }
                None => println!("{}", format_summary_table(&summary)),
            }
        }
    }

    Ok(())
}
