//! Time utilities
//!
//! Timestamps are `i64` milliseconds since the Unix epoch, UTC throughout.
//!
//! ```rust
//! use xchange_core::time::{iso8601, parse8601};
//!
//! let iso = iso8601(1_704_110_400_000).unwrap();
//! assert_eq!(iso, "2024-01-01T12:00:00.000Z");
//! assert_eq!(parse8601(&iso).unwrap(), 1_704_110_400_000);
//! ```

use crate::error::{Error, ParseError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Current time in milliseconds since the Unix epoch
#[inline]
pub fn milliseconds() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time in seconds since the Unix epoch
#[inline]
pub fn seconds() -> i64 {
    Utc::now().timestamp()
}

fn to_datetime(timestamp: i64) -> Result<DateTime<Utc>> {
    if timestamp < 0 {
        return Err(Error::invalid_request(format!(
            "Invalid timestamp: {timestamp}"
        )));
    }
    DateTime::<Utc>::from_timestamp_millis(timestamp)
        .ok_or_else(|| Error::invalid_request(format!("Invalid timestamp: {timestamp}")))
}

/// Formats a millisecond timestamp as `2024-01-01T12:00:00.000Z`.
pub fn iso8601(timestamp: i64) -> Result<String> {
    Ok(to_datetime(timestamp)?
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string())
}

/// Parses an ISO 8601 (or space-separated) datetime into milliseconds.
pub fn parse8601(datetime: &str) -> Result<i64> {
    if datetime.is_empty() {
        return Err(ParseError::timestamp("Empty datetime string").into());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime) {
        return Ok(dt.timestamp_millis());
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(datetime, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).timestamp_millis())
        .ok_or_else(|| ParseError::timestamp(format!("Unable to parse datetime: {datetime}")).into())
}

/// Formats a timestamp as `yyyy-MM-dd HH:mm:ss`, with a custom date/time separator.
pub fn ymdhms(timestamp: i64, separator: Option<&str>) -> Result<String> {
    let datetime = to_datetime(timestamp)?;
    Ok(format!(
        "{}{}{}",
        datetime.format("%Y-%m-%d"),
        separator.unwrap_or(" "),
        datetime.format("%H:%M:%S")
    ))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_positive() {
        assert!(milliseconds() > 1_600_000_000_000);
        assert!(seconds() > 1_600_000_000);
    }

    #[test]
    fn test_iso8601_format() {
        assert_eq!(iso8601(1_704_110_400_123).unwrap(), "2024-01-01T12:00:00.123Z");
        assert!(iso8601(-1).is_err());
    }

    #[test]
    fn test_parse8601_variants() {
        let expected = 1_704_110_400_000;
        assert_eq!(parse8601("2024-01-01T12:00:00.000Z").unwrap(), expected);
        assert_eq!(parse8601("2024-01-01T12:00:00Z").unwrap(), expected);
        assert_eq!(parse8601("2024-01-01T12:00:00+00:00").unwrap(), expected);
        assert_eq!(parse8601("2024-01-01 12:00:00").unwrap(), expected);
        assert_eq!(
            parse8601("2017-12-08T23:03:20.125476Z").unwrap(),
            1_512_774_200_125
        );
        assert!(parse8601("").is_err());
        assert!(parse8601("yesterday").is_err());
    }

    #[test]
    fn test_ymdhms() {
        let ts = 1_704_110_400_000;
        assert_eq!(ymdhms(ts, None).unwrap(), "2024-01-01 12:00:00");
        assert_eq!(ymdhms(ts, Some("T")).unwrap(), "2024-01-01T12:00:00");
    }
}
