//! Flexible calendar date parsing
//!
//! Dates are stored and written as ISO `YYYY-MM-DD`, but user input and
//! imported files may use a handful of other common layouts.

use chrono::NaiveDate;
use thiserror::Error;

/// Canonical storage format
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted input layouts, tried in order (ISO first)
const INPUT_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d %B %Y",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("Date is required")]
    Empty,
    #[error("Invalid date '{0}'. Try YYYY-MM-DD (e.g., 2025-08-16)")]
    Invalid(String),
}

/// Parse a date written in any of the accepted layouts
///
/// A timestamp whose first ten characters are an ISO date
/// (`2025-01-05 00:00:00`, `2025-01-05T10:30:00Z`) is accepted too, since
/// spreadsheet tools often write dates that way.
pub fn parse_flexible_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Some(date) = INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Ok(date);
    }

    if s.len() > 10 && s.is_char_boundary(10) {
        let (head, tail) = s.split_at(10);
        if tail.starts_with(|c: char| c == ' ' || c == 'T') {
            if let Ok(date) = NaiveDate::parse_from_str(head, ISO_DATE_FORMAT) {
                return Ok(date);
            }
        }
    }

    Err(DateParseError::Invalid(s.to_string()))
}

/// Parse an optional date field: blank input means "not given"
pub fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>, DateParseError> {
    match parse_flexible_date(input) {
        Ok(date) => Ok(Some(date)),
        Err(DateParseError::Empty) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accepted_layouts() {
        assert_eq!(parse_flexible_date("2025-08-16").unwrap(), ymd(2025, 8, 16));
        assert_eq!(parse_flexible_date("16-08-2025").unwrap(), ymd(2025, 8, 16));
        assert_eq!(parse_flexible_date("16/08/2025").unwrap(), ymd(2025, 8, 16));
        assert_eq!(parse_flexible_date("2025/08/16").unwrap(), ymd(2025, 8, 16));
        assert_eq!(parse_flexible_date("16 Aug 2025").unwrap(), ymd(2025, 8, 16));
        assert_eq!(parse_flexible_date("16 August 2025").unwrap(), ymd(2025, 8, 16));
        assert_eq!(parse_flexible_date("  2025-01-05 ").unwrap(), ymd(2025, 1, 5));
    }

    #[test]
    fn test_timestamp_prefix() {
        assert_eq!(
            parse_flexible_date("2025-01-05 00:00:00").unwrap(),
            ymd(2025, 1, 5)
        );
        assert_eq!(
            parse_flexible_date("2025-01-05T10:30:00Z").unwrap(),
            ymd(2025, 1, 5)
        );
        assert!(parse_flexible_date("2025-01-05xx").is_err());
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(parse_flexible_date(""), Err(DateParseError::Empty));
        assert!(matches!(
            parse_flexible_date("2025-02-30"),
            Err(DateParseError::Invalid(_))
        ));
        assert!(parse_flexible_date("yesterday").is_err());
        assert!(parse_flexible_date("08/16/2025").is_err());
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(parse_optional_date("   ").unwrap(), None);
        assert_eq!(
            parse_optional_date("2025-03-01").unwrap(),
            Some(ymd(2025, 3, 1))
        );
        assert!(parse_optional_date("nope").is_err());
    }
}
