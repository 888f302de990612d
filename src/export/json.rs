//! JSON export of the monthly summary

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;
use crate::reports::MonthlySummary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Serializable form of a monthly summary
///
/// Amounts are written as two-decimal strings so values survive the round
/// trip exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub categories: Vec<String>,
    pub months: Vec<MonthExport>,
    pub grand_total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthExport {
    /// `YYYY-MM`
    pub month: String,
    pub total: Money,
    pub count: usize,
    /// Every category column, zero-filled
    pub amounts: BTreeMap<String, Money>,
}

impl SummaryExport {
    pub fn from_summary(summary: &MonthlySummary) -> Self {
        let months = summary
            .rows()
            .iter()
            .map(|row| MonthExport {
                month: row.month.to_string(),
                total: row.total,
                count: row.count,
                amounts: summary
                    .categories()
                    .iter()
                    .map(|c| (c.clone(), row.amount(c)))
                    .collect(),
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories: summary.categories().to_vec(),
            months,
            grand_total: summary.grand_total(),
        }
    }
}

/// Write the summary as JSON
pub fn export_summary_json<W: Write>(
    summary: &MonthlySummary,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = SummaryExport::from_summary(summary);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use chrono::NaiveDate;

    #[test]
    fn test_json_export() {
        let expenses = vec![
            Expense::new(
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
                "food",
                Money::from_cents(1000),
                "",
            ),
            Expense::new(
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                "rent",
                Money::from_cents(2000),
                "",
            ),
        ];
        let summary = MonthlySummary::generate(&expenses);

        let mut out = Vec::new();
        export_summary_json(&summary, &mut out, true).unwrap();

        let parsed: SummaryExport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.categories, vec!["food", "rent"]);
        assert_eq!(parsed.months.len(), 2);
        assert_eq!(parsed.months[0].month, "2025-01");
        assert_eq!(parsed.months[0].amounts["rent"], Money::zero());
        assert_eq!(parsed.grand_total, Money::from_cents(3000));
    }
}
