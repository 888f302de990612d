//! Diagnostic logging setup
//!
//! Installs a `tracing-subscriber` fmt subscriber filtered by the
//! `EXPENSE_LOG` environment variable. While the TUI owns the terminal,
//! output goes to a log file in the data directory instead of stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use super::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};

/// Environment variable holding the tracing filter directive
pub const LOG_ENV: &str = "EXPENSE_LOG";

/// Where diagnostic output should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
pub fn init_logging(paths: &ExpensePaths, target: LogTarget) -> ExpenseResult<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File => {
            paths.ensure_directories()?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(paths.log_file())
                .map_err(|e| ExpenseError::Io(format!("Failed to open log file: {}", e)))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(|e| ExpenseError::Config(format!("Failed to initialise logging: {}", e)))
}
