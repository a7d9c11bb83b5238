//! Date and timestamp utilities

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Today's calendar date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a calendar date as the session date key ("YYYY-MM-DD")
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a date key back into a calendar date
pub fn parse_date_key(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| Error::InvalidInput(format!("invalid date key '{}': {}", s, e)))
}

/// Resolve a client-supplied millisecond timestamp to its UTC calendar date
pub fn date_from_timestamp_ms(millis: i64) -> Result<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| Error::InvalidInput(format!("timestamp out of range: {}", millis)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_key_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert_eq!(date_key(date), "2026-08-30");
        assert_eq!(parse_date_key("2026-08-30").unwrap(), date);
    }

    #[test]
    fn parse_date_key_rejects_garbage() {
        assert!(matches!(
            parse_date_key("not-a-date"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn timestamp_resolves_to_utc_date() {
        // 2026-08-30 23:59:59 UTC
        let date = date_from_timestamp_ms(1_788_134_399_000).unwrap();
        assert_eq!(date_key(date), "2026-08-30");
    }

    #[test]
    fn timestamp_out_of_range_is_invalid_input() {
        assert!(matches!(
            date_from_timestamp_ms(i64::MAX),
            Err(Error::InvalidInput(_))
        ));
    }
}
