//! Local-calendar-date helpers.
//!
//! Day boundaries are always computed from local calendar components,
//! never from fixed-duration epoch arithmetic, so they stay correct
//! across daylight-saving transitions.

use chrono::{Local, NaiveDate, TimeZone};

/// The device-local calendar date right now.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn to_local_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_date_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// True when `date_iso` names the calendar day immediately before
/// `today_iso`. Unparseable input is never "yesterday".
pub fn is_yesterday(date_iso: &str, today_iso: &str) -> bool {
    match parse_date_iso(today_iso).and_then(|today| today.pred_opt()) {
        Some(yesterday) => date_iso == to_local_date_iso(yesterday),
        None => false,
    }
}

/// Local calendar date of an epoch-millisecond timestamp.
pub fn local_date_of_millis(millis: i64) -> Option<NaiveDate> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_local_date_iso() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(to_local_date_iso(date), "2025-01-05");
    }

    #[test]
    fn parses_what_it_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(parse_date_iso(&to_local_date_iso(date)), Some(date));
        assert_eq!(parse_date_iso("not-a-date"), None);
    }

    #[test]
    fn detects_yesterday() {
        assert!(is_yesterday("2025-01-04", "2025-01-05"));
        assert!(!is_yesterday("2025-01-03", "2025-01-05"));
        assert!(!is_yesterday("2025-01-06", "2025-01-05"));
    }

    #[test]
    fn yesterday_crosses_month_and_year_boundaries() {
        assert!(is_yesterday("2025-02-28", "2025-03-01"));
        assert!(is_yesterday("2024-12-31", "2025-01-01"));
        assert!(!is_yesterday("2025-02-28", "2025-03-02"));
    }

    #[test]
    fn yesterday_rejects_garbage_today() {
        assert!(!is_yesterday("2025-01-04", "garbage"));
    }
}
