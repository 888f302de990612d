use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_expense_command, handle_file_command, handle_report_command, handle_settings_command,
    ExpenseCommands, FileCommands, ReportCommands, Session, SettingsCommands,
};
use expense_tracker::config::logging::{init_logging, LogTarget};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::LoadMode;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker with CSV files and monthly summaries",
    long_about = "Record expenses by date, category and amount, keep them in a plain \
                  CSV file, and roll them up into a monthly summary. Run without a \
                  subcommand to open the interactive interface."
)]
struct Cli {
    /// Ledger CSV file (defaults to expenses.csv in the data directory)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Skip malformed CSV rows instead of refusing to load the file
    #[arg(long, global = true)]
    skip_invalid: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    #[command(flatten)]
    File(FileCommands),

    #[command(flatten)]
    Settings(SettingsCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    paths.ensure_directories()?;
    let mut settings = Settings::load(&paths)?;

    let load_mode = if cli.skip_invalid {
        LoadMode::SkipInvalid
    } else {
        LoadMode::Strict
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            init_logging(&paths, LogTarget::File)?;
            let ledger_path = settings.ledger_path(&paths, cli.file);
            expense_tracker::tui::run_tui(paths, settings, ledger_path, load_mode)?;
        }
        Some(Commands::Settings(cmd)) => {
            init_logging(&paths, LogTarget::Stderr)?;
            let ledger_path = settings.ledger_path(&paths, cli.file);
            handle_settings_command(&paths, &mut settings, &ledger_path, cmd)?;
        }
        Some(Commands::File(cmd)) => {
            init_logging(&paths, LogTarget::Stderr)?;
            let mut session = match cmd {
                FileCommands::Load { .. } => {
                    Session::unopened(paths, settings, cli.file, load_mode)
                }
                FileCommands::Save { .. } => Session::open(paths, settings, cli.file, load_mode)?,
            };
            handle_file_command(&mut session, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            init_logging(&paths, LogTarget::Stderr)?;
            let mut session = Session::open(paths, settings, cli.file, load_mode)?;
            handle_expense_command(&mut session, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            init_logging(&paths, LogTarget::Stderr)?;
            let mut session = Session::open(paths, settings, cli.file, load_mode)?;
            handle_report_command(&mut session, cmd)?;
        }
    }

    Ok(())
}
