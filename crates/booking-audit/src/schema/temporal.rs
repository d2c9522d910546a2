//! Lenient parsing of textual dates and timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Cheap shape check so free text like "Confirmed" never reaches chrono.
static DATE_SHAPE: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}").unwrap(), // ISO / alt ISO
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}").unwrap(), // US / European
        Regex::new(r"(?i)^[a-z]{3,9}\.? \d{1,2},? \d{4}$").unwrap(), // Jan 5, 2024
        Regex::new(r"(?i)^\d{1,2} [a-z]{3,9}\.? \d{4}$").unwrap(), // 5 Jan 2024
    ]
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// A successfully parsed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub value: NaiveDateTime,
    /// Whether the source text carried a time of day.
    pub has_time: bool,
}

/// Parse a date or timestamp, returning `None` for anything unrecognised.
///
/// Month-first is assumed for slash-separated dates. Values with a UTC offset
/// are normalised to UTC.
pub fn parse_datetime(value: &str) -> Option<ParsedDate> {
    let trimmed = value.trim();
    if !DATE_SHAPE.iter().any(|p| p.is_match(trimmed)) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ParsedDate {
            value: dt.naive_utc(),
            has_time: true,
        });
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ParsedDate {
                value: dt,
                has_time: true,
            });
        }
    }

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(ParsedDate {
                value: d.and_hms_opt(0, 0, 0)?,
                has_time: false,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_iso_date() {
        let parsed = parse_datetime("2019-01-01").unwrap();
        assert_eq!(parsed.value, ymd(2019, 1, 1));
        assert!(!parsed.has_time);
    }

    #[test]
    fn test_timestamps() {
        let parsed = parse_datetime("2024-03-05 14:30:00").unwrap();
        assert!(parsed.has_time);
        assert!(parse_datetime("2024-03-05T14:30:00.250").is_some());
        assert!(parse_datetime("2024-03-05T14:30:00+02:00").is_some());
        assert!(parse_datetime("03/05/2024 14:30").is_some());
    }

    #[test]
    fn test_month_first_and_named_months() {
        assert_eq!(parse_datetime("03/05/2024").unwrap().value, ymd(2024, 3, 5));
        assert_eq!(parse_datetime("Mar 5, 2024").unwrap().value, ymd(2024, 3, 5));
        assert_eq!(parse_datetime("5 March 2024").unwrap().value, ymd(2024, 3, 5));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert!(parse_datetime("not-a-date").is_none());
        assert!(parse_datetime("Confirmed").is_none());
        assert!(parse_datetime("42").is_none());
        assert!(parse_datetime("2024-13-45").is_none());
        assert!(parse_datetime("").is_none());
    }
}
