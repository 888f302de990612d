//! CLI commands for configuration, categories and history

use std::path::Path;

use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::is_reserved_category;

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// List, add or remove the categories offered when entering expenses
    Categories {
        /// Add a category
        #[arg(long, conflicts_with = "remove")]
        add: Option<String>,

        /// Remove a category
        #[arg(long)]
        remove: Option<String>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

/// Handle a settings command
pub fn handle_settings_command(
    paths: &ExpensePaths,
    settings: &mut Settings,
    ledger_path: &Path,
    cmd: SettingsCommands,
) -> ExpenseResult<()> {
    match cmd {
        SettingsCommands::Categories { add, remove } => {
            if let Some(name) = add {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(ExpenseError::Validation("Category name cannot be empty".into()));
                }
                if is_reserved_category(&name) {
                    return Err(ExpenseError::Validation(format!(
                        "'{}' is reserved for a summary column",
                        name
                    )));
                }
                if settings.categories.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
                    return Err(ExpenseError::Validation(format!(
                        "Category '{}' already exists",
                        name
                    )));
                }
                settings.categories.push(name.clone());
                settings.save(paths)?;
                println!("Added category: {}", name);
            } else if let Some(name) = remove {
                if name == settings.default_category {
                    return Err(ExpenseError::Validation(format!(
                        "Cannot remove the default category '{}'",
                        name
                    )));
                }
                let before = settings.categories.len();
                settings.categories.retain(|c| c != &name);
                if settings.categories.len() == before {
                    return Err(ExpenseError::NotFound {
                        entity_type: "Category",
                        identifier: name,
                    });
                }
                settings.save(paths)?;
                println!("Removed category: {}", name);
            } else {
                for category in settings.category_choices() {
                    if category == settings.default_category {
                        println!("{} (default)", category);
                    } else {
                        println!("{}", category);
                    }
                }
            }
        }

        SettingsCommands::History { limit } => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = logger.read_recent(limit)?;
            if entries.is_empty() {
                println!("No history recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }

        SettingsCommands::Config => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", ledger_path.display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Log file:       {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Default category: {}", settings.default_category);
            println!("  Categories:       {}", settings.categories.join(", "));
        }
    }

    Ok(())
}
