use std::ops::Index;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_yaml::{Number, Value};
use thiserror::Error;

/// Largest distance from the epoch, in milliseconds, a timestamp may have (±100 000 000 days).
pub const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateCoercionError {
    #[error("unrecognised date format")]
    Unparsable,
    #[error("{0} is not a calendar date")]
    InvalidCalendarDate(String),
    #[error("timestamp out of range")]
    OutOfRange,
    #[error("not a string or number")]
    UnsupportedType,
}

// Years outside 0000-9999 carry a sign and may have up to six digits, the way they are formatted
lazy_static! {
    static ref DATE_REGEX: Regex = Regex::new(
        r"^(\d{4}|[+-]\d{4,6})-(\d{1,2})-(\d{1,2})$"
    ).unwrap();
    static ref DATE_TIME_REGEX: Regex = Regex::new(
        r"^(\d{4}|[+-]\d{4,6})-(\d{1,2})-(\d{1,2})[Tt ](\d{1,2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?[Zz]?$"
    ).unwrap();
}

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, DateCoercionError> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(DateCoercionError::InvalidCalendarDate(date_str.to_string())),
    }
}

fn capture_date(caps: &Captures, buf: &str) -> Result<NaiveDate, DateCoercionError> {
    let y: i32 = to_int(caps.index(1), buf)?;
    let m: u32 = to_int(caps.index(2), buf)?;
    let d: u32 = to_int(caps.index(3), buf)?;

    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DateCoercionError::InvalidCalendarDate(buf.to_string()))
}

fn capture_time(caps: &Captures, buf: &str) -> Result<NaiveTime, DateCoercionError> {
    let h: u32 = to_int(caps.index(4), buf)?;
    let mn: u32 = to_int(caps.index(5), buf)?;
    let s: u32 = match caps.get(6) {
        Some(s) => to_int(s.as_str(), buf)?,
        None => 0,
    };
    // Fraction digits are right-padded to nanoseconds: ".5" is 500ms
    let nano: u32 = match caps.get(7) {
        Some(frac) => to_int(&format!("{:0<9}", frac.as_str()), buf)?,
        None => 0,
    };

    NaiveTime::from_hms_nano_opt(h, mn, s, nano)
        .ok_or_else(|| DateCoercionError::InvalidCalendarDate(buf.to_string()))
}

/// Parses the textual date representations accepted in front-matter.
///
/// Accepted, in order: RFC 3339, `YYYY-MM-DD` (midnight UTC),
/// `YYYY-MM-DD HH:MM[:SS[.fff]][Z]` (read as UTC) and RFC 2822. The year of the
/// last two forms may also be signed, as in `+11476-08-15` or `-0001-01-01T00:00:00Z`.
pub fn parse_date_time(buf: &str) -> Result<DateTime<Utc>, DateCoercionError> {
    let buf = buf.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Ok(date_time.with_timezone(&Utc));
    }

    if let Some(caps) = DATE_REGEX.captures(buf) {
        let date = capture_date(&caps, buf)?;
        return Ok(NaiveDateTime::new(date, NaiveTime::MIN).and_utc());
    }

    if let Some(caps) = DATE_TIME_REGEX.captures(buf) {
        let date = capture_date(&caps, buf)?;
        let time = capture_time(&caps, buf)?;
        return Ok(NaiveDateTime::new(date, time).and_utc());
    }

    if let Ok(date_time) = DateTime::parse_from_rfc2822(buf) {
        return Ok(date_time.with_timezone(&Utc));
    }

    Err(DateCoercionError::Unparsable)
}

/// Milliseconds since the Unix epoch. Fractional milliseconds are truncated.
pub fn from_timestamp(number: &Number) -> Result<DateTime<Utc>, DateCoercionError> {
    let millis = if let Some(i) = number.as_i64() {
        i as f64
    } else if let Some(f) = number.as_f64() {
        f.trunc()
    } else {
        return Err(DateCoercionError::OutOfRange);
    };

    if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MILLIS {
        return Err(DateCoercionError::OutOfRange);
    }

    DateTime::from_timestamp_millis(millis as i64).ok_or(DateCoercionError::OutOfRange)
}

pub fn coerce_date(value: &Value) -> Result<DateTime<Utc>, DateCoercionError> {
    match value {
        Value::String(s) => parse_date_time(s),
        Value::Number(n) => from_timestamp(n),
        _ => Err(DateCoercionError::UnsupportedType),
    }
}

/// Inverse of [`parse_date_time`]: RFC 3339 in UTC with only as many fraction digits as needed.
pub fn format_date_time(date_time: &DateTime<Utc>) -> String {
    date_time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, TimeZone, Timelike};

    use super::*;

    #[test]
    fn test_parse_date_only() {
        let date_time = parse_date_time("2024-01-15").unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
        assert_eq!(date_time.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_time() {
        let date_time = parse_date_time("2017-09-10 10:42:32.123").unwrap();
        assert_eq!(date_time.year(), 2017);
        assert_eq!((date_time.hour(), date_time.minute(), date_time.second()), (10, 42, 32));
        assert_eq!(date_time.timestamp_subsec_millis(), 123);

        let date_time = parse_date_time("2017-09-10T10:42").unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2017, 9, 10, 10, 42, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let date_time = parse_date_time("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc2822() {
        let date_time = parse_date_time("Mon, 15 Jan 2024 10:30:00 +0000").unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_date_time("2024-02-30"), Err(DateCoercionError::InvalidCalendarDate("2024-02-30".to_string())));
        assert_eq!(parse_date_time("2024-01-15 25:00:00"), Err(DateCoercionError::InvalidCalendarDate("2024-01-15 25:00:00".to_string())));
        assert_eq!(parse_date_time("yesterday"), Err(DateCoercionError::Unparsable));
        assert_eq!(parse_date_time(""), Err(DateCoercionError::Unparsable));
    }

    #[test]
    fn test_timestamps() {
        let date_time = coerce_date(&Value::from(1705276800000i64)).unwrap();
        assert_eq!(date_time, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());

        let date_time = coerce_date(&Value::from(1.9)).unwrap();
        assert_eq!(date_time.timestamp_millis(), 1);

        assert_eq!(coerce_date(&Value::from(f64::NAN)), Err(DateCoercionError::OutOfRange));
        assert_eq!(coerce_date(&Value::from(9e15)), Err(DateCoercionError::OutOfRange));
        assert_eq!(coerce_date(&Value::Bool(true)), Err(DateCoercionError::UnsupportedType));
    }

    #[test]
    fn test_parse_signed_years() {
        let date_time = parse_date_time("+11476-08-15T05:20:00Z").unwrap();
        assert_eq!(date_time.year(), 11476);
        assert_eq!(date_time.timestamp_millis(), 300000000000000);

        let date_time = parse_date_time("-0001-01-01T00:00:00Z").unwrap();
        assert_eq!(date_time.timestamp_millis(), -62198755200000);

        assert_eq!(parse_date_time("+11476-08-15").unwrap().year(), 11476);
        assert_eq!(parse_date_time("+11476-02-30"), Err(DateCoercionError::InvalidCalendarDate("+11476-02-30".to_string())));
        assert_eq!(parse_date_time("+1234567-01-01"), Err(DateCoercionError::Unparsable));
    }

    #[test]
    fn test_format_round_trip() {
        for input in ["2024-01-15", "2017-09-10 10:42:32.123", "2024-01-15T10:30:00.123456789Z"] {
            let date_time = parse_date_time(input).unwrap();
            assert_eq!(parse_date_time(&format_date_time(&date_time)), Ok(date_time));
        }
        let date_time = parse_date_time("2024-01-15").unwrap();
        assert_eq!(format_date_time(&date_time), "2024-01-15T00:00:00Z");

        // Timestamps and offsets can move the year out of 0000-9999
        for millis in [300000000000000i64, -62198755200000, 8_000_000_000_000_000, -8_000_000_000_000_000] {
            let date_time = coerce_date(&Value::from(millis)).unwrap();
            assert_eq!(parse_date_time(&format_date_time(&date_time)), Ok(date_time));
        }
        let date_time = parse_date_time("0000-01-01T00:30:00.123456789+01:00").unwrap();
        assert_eq!(date_time.year(), -1);
        assert_eq!(parse_date_time(&format_date_time(&date_time)), Ok(date_time));
    }
}
