//! User settings for the expense tracker
//!
//! Manages user preferences: display formats, the category list offered by
//! the entry form, and the default ledger location.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Categories offered by the entry form out of the box
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food",
    "Transport",
    "Bills",
    "Shopping",
    "Entertainment",
    "Health",
    "Education",
    "Groceries",
    "Travel",
    "Other",
];

/// User settings for the expense tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Display format for dates (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Categories offered by the entry form
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Category used when none is given
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Ledger CSV to open when `--file` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_category() -> String {
    "Other".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            categories: default_categories(),
            default_category: default_category(),
            ledger_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Nothing is written; the file appears on the first `save`.
    pub fn load(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        read_json(paths.settings_file()).map_err(|e| match e {
            ExpenseError::Storage(msg) => ExpenseError::Config(msg),
            other => other,
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Resolve which ledger file to open, honouring an explicit override
    pub fn ledger_path(&self, paths: &ExpensePaths, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.ledger_file.clone())
            .unwrap_or_else(|| paths.default_ledger_file())
    }

    /// Categories for the entry form, with the default category always present
    pub fn category_choices(&self) -> Vec<String> {
        let mut choices = self.categories.clone();
        if !choices.iter().any(|c| c == &self.default_category) {
            choices.push(self.default_category.clone());
        }
        choices
    }

    /// Format a date for display, falling back to ISO for an invalid format
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if self.date_format.is_empty() || write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.categories.len(), 10);
        assert_eq!(settings.default_category, "Other");
        assert!(settings.ledger_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.categories = vec!["Rent".into(), "Food".into()];
        settings.save(&paths).unwrap();

        let loaded = Settings::load(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_without_file_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(Settings::load(&paths).unwrap(), Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.default_category, "Other");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_ledger_path_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        assert_eq!(settings.ledger_path(&paths, None), paths.default_ledger_file());

        settings.ledger_file = Some(PathBuf::from("/tmp/mine.csv"));
        assert_eq!(
            settings.ledger_path(&paths, None),
            PathBuf::from("/tmp/mine.csv")
        );
        assert_eq!(
            settings.ledger_path(&paths, Some(PathBuf::from("other.csv"))),
            PathBuf::from("other.csv")
        );
    }

    #[test]
    fn test_category_choices_include_default() {
        let mut settings = Settings::default();
        settings.categories = vec!["Rent".into()];
        assert_eq!(settings.category_choices(), vec!["Rent", "Other"]);
    }

    #[test]
    fn test_format_date_falls_back_on_bad_format() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let mut settings = Settings::default();
        assert_eq!(settings.format_date(date), "2025-03-09");

        settings.date_format = "%d/%m/%Y".into();
        assert_eq!(settings.format_date(date), "09/03/2025");

        settings.date_format = "%H:%M".into();
        assert_eq!(settings.format_date(date), "2025-03-09");
    }
}
