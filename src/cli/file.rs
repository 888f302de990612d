//! CLI commands for loading and saving ledger files

use std::path::PathBuf;

use clap::Subcommand;

use super::{report_skipped, Session};
use crate::error::ExpenseResult;

/// File subcommands
#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// Replace the ledger with the contents of a CSV file
    Load {
        /// CSV file to read
        path: PathBuf,
    },

    /// Write the ledger to another CSV file
    Save {
        /// Destination CSV file
        path: PathBuf,
    },
}

/// Handle a file command
pub fn handle_file_command(session: &mut Session, cmd: FileCommands) -> ExpenseResult<()> {
    match cmd {
        FileCommands::Load { path } => {
            let target = session.ledger.path().to_path_buf();
            let mode = session.load_mode;

            let report = session.service().load(&path, mode)?;
            report_skipped(&report);

            // keep writing to the ledger file the session was opened with
            session.ledger.set_path(&target);
            session.service().save()?;

            println!(
                "Loaded {} expense(s) from {} into {}",
                report.expenses.len(),
                path.display(),
                target.display()
            );
        }

        FileCommands::Save { path } => {
            let original = session.ledger.path().to_path_buf();
            let written = session.service().save_as(&path)?;
            session.ledger.set_path(original);

            println!(
                "Saved {} expense(s) to: {}",
                session.ledger.len(),
                written.display()
            );
        }
    }

    Ok(())
}
