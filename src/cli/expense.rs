//! Expense CLI commands
//!
//! Add, edit, delete and list ledger rows. Rows are addressed by the 1-based
//! number shown in the `#` column of `list`.

use clap::{Args, Subcommand};

use super::{row_indices, Session};
use crate::display::{format_expense_table, format_totals};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{YearMonth, ISO_DATE_FORMAT};
use crate::reports::CategoryTotals;
use crate::services::{ExpenseFilter, ExpenseInput};

/// Date range and category options shared by listing commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// First date to include
    #[arg(long)]
    pub from: Option<String>,

    /// Last date to include
    #[arg(long)]
    pub to: Option<String>,

    /// A whole calendar month, e.g. 2025-01
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub month: Option<YearMonth>,

    /// Only this category ("All" for every category)
    #[arg(short, long)]
    pub category: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ExpenseResult<ExpenseFilter> {
        let mut filter = ExpenseFilter::parse(
            self.from.as_deref().unwrap_or(""),
            self.to.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or(""),
        )?;
        if let Some(month) = self.month {
            filter.from = month.first_day();
            filter.to = month.last_day();
        }
        Ok(filter)
    }
}

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Amount (e.g. "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Free-text description
        description: Option<String>,

        /// Category (defaults to the configured default category)
        #[arg(short, long)]
        category: Option<String>,

        /// Date, e.g. 2025-08-16 or 16/08/2025 (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Edit an expense in place
    Edit {
        /// Row number from `list`
        row: usize,

        /// New date
        #[arg(short, long)]
        date: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete one or more expenses
    #[command(alias = "rm")]
    Delete {
        /// Row numbers from `list`
        #[arg(required = true, num_args = 1..)]
        rows: Vec<usize>,
    },

    /// List expenses
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle an expense command
pub fn handle_expense_command(session: &mut Session, cmd: ExpenseCommands) -> ExpenseResult<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
        } => {
            let input = ExpenseInput::parse(
                date.as_deref().unwrap_or(""),
                category.as_deref().unwrap_or(""),
                &amount,
                description.as_deref().unwrap_or(""),
                &session.settings,
            )?;
            let expense = session.service().add(input)?;
            session.save_if_dirty()?;

            println!("Added expense #{}: {}", session.ledger.len(), expense);
        }

        ExpenseCommands::Edit {
            row,
            date,
            category,
            amount,
            description,
        } => {
            let index = row_indices(&[row])?[0];
            let current = session
                .ledger
                .get(index)
                .cloned()
                .ok_or_else(|| ExpenseError::expense_not_found(format!("row {}", row)))?;

            if date.is_none() && category.is_none() && amount.is_none() && description.is_none() {
                return Err(ExpenseError::Validation(
                    "Nothing to change; pass --date, --category, --amount or --description".into(),
                ));
            }

            let input = ExpenseInput::parse(
                &date.unwrap_or_else(|| current.date.format(ISO_DATE_FORMAT).to_string()),
                &category.unwrap_or(current.category),
                &amount.unwrap_or_else(|| current.amount.to_string()),
                &description.unwrap_or(current.description),
                &session.settings,
            )?;
            let expense = session.service().update(index, input)?;
            session.save_if_dirty()?;

            println!("Updated expense #{}: {}", row, expense);
        }

        ExpenseCommands::Delete { rows } => {
            let indices = row_indices(&rows)?;
            let removed = session.service().delete(&indices)?;
            session.save_if_dirty()?;

            println!("Deleted {} expense(s):", removed.len());
            for expense in &removed {
                println!("  {}", expense);
            }
        }

        ExpenseCommands::List { filter } => {
            let filter = filter.to_filter()?;
            let service = session.service();
            let rows = service.list(&filter);

            println!("{}", format_expense_table(&rows));
            println!();
            print!(
                "{}",
                format_totals(&CategoryTotals::generate(rows.iter().map(|(_, e)| *e)))
            );
            if filter.is_active() {
                println!("Filter: {}", filter.describe());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_month_sets_inclusive_range() {
        let args = FilterArgs {
            month: Some("2024-02".parse().unwrap()),
            category: Some("All".into()),
            ..Default::default()
        };
        let filter = args.to_filter().unwrap();
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(filter.to, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert!(filter.category.is_none());
    }

    #[test]
    fn test_bad_date_names_the_bound() {
        let args = FilterArgs {
            to: Some("soon".into()),
            ..Default::default()
        };
        let err = args.to_filter().unwrap_err();
        assert!(err.to_string().contains("To date"));
    }
}
