//! Field converters and temporal helpers.
//!
//! Garmin exports write "--" or "0" into a field when a measurement was not
//! captured, and group digits with commas ("1,234"). The converters here
//! normalize those conventions before the typed parse, returning `None` for
//! absent fields rather than zero.

use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;
use thiserror::Error;

use crate::activity::Pace;

/// Errors from converting external text fields into typed values.
#[derive(Debug, Error)]
pub enum ParseFieldError {
    /// Not a valid YYYY-MM-DD date
    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Not a valid timestamp
    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    /// Not a valid H:MM:SS span
    #[error("invalid duration {0:?} (expected H:MM:SS)")]
    InvalidDuration(String),

    /// Not a valid integer field
    #[error("invalid integer field {0:?}")]
    InvalidInteger(String),

    /// Not a valid decimal field
    #[error("invalid decimal field {0:?}")]
    InvalidDecimal(String),

    /// Not a valid MM:SS pace field
    #[error("invalid pace field {0:?} (expected MM:SS)")]
    InvalidPace(String),
}

/// Whether a field carries one of the "not measured" sentinels.
fn is_absent(field: &str) -> bool {
    field.is_empty() || field == "--" || field == "0"
}

/// Strip digit grouping commas from a numeric field.
fn ungroup(field: &str) -> String {
    field.replace(',', "")
}

/// Convert a numeric field to an integer, or `None` when absent.
pub fn field_to_u32(field: &str) -> Result<Option<u32>, ParseFieldError> {
    if is_absent(field) {
        return Ok(None);
    }
    ungroup(field)
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ParseFieldError::InvalidInteger(field.to_string()))
}

/// Convert a numeric field to a decimal value, or `None` when absent.
pub fn field_to_f64(field: &str) -> Result<Option<f64>, ParseFieldError> {
    if is_absent(field) {
        return Ok(None);
    }
    ungroup(field)
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ParseFieldError::InvalidDecimal(field.to_string()))
}

/// Convert a MM:SS field to a [`Pace`], or `None` when absent.
pub fn field_to_pace(field: &str) -> Result<Option<Pace>, ParseFieldError> {
    if is_absent(field) {
        return Ok(None);
    }
    field
        .parse::<Pace>()
        .map(Some)
        .map_err(|_| ParseFieldError::InvalidPace(field.to_string()))
}

/// Parse a YYYY-MM-DD string into a date.
pub fn parse_date(field: &str) -> Result<NaiveDate, ParseFieldError> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .map_err(|_| ParseFieldError::InvalidDate(field.to_string()))
}

/// Whether a string is a valid YYYY-MM-DD date.
pub fn is_date(field: &str) -> bool {
    parse_date(field).is_ok()
}

/// Parse an activity start timestamp. Garmin writes ISO timestamps with
/// either a space or a 'T' separator.
pub fn parse_timestamp(field: &str) -> Result<NaiveDateTime, ParseFieldError> {
    NaiveDateTime::parse_from_str(field, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(field, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| ParseFieldError::InvalidTimestamp(field.to_string()))
}

/// Parse an H:MM:SS span into a duration.
pub fn hms_duration(field: &str) -> Result<Duration, ParseFieldError> {
    let invalid = || ParseFieldError::InvalidDuration(field.to_string());

    let mut parts = field.split(':');
    let (Some(h), Some(m), Some(s), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let hours: u64 = h.parse().map_err(|_| invalid())?;
    let minutes: u64 = m.parse().map_err(|_| invalid())?;
    let seconds: u64 = s.parse().map_err(|_| invalid())?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    Ok(Duration::from_secs(hours * 3600 + minutes * 60 + seconds))
}

/// Break a duration into whole hours, minutes and seconds.
///
/// Cumulative exercise spans can exceed a day, so hours are not wrapped.
pub fn hms_parts(duration: Duration) -> (u64, u64, u64) {
    let total = duration.as_secs();
    (total / 3600, total % 3600 / 60, total % 60)
}

/// Render a duration as H:MM:SS with unpadded hours.
pub fn format_hms(duration: Duration) -> String {
    let (hours, minutes, seconds) = hms_parts(duration);
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Render an integer with comma digit grouping.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render a non-negative decimal with comma digit grouping and a fixed
/// number of decimal places.
pub fn group_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    match text.split_once('.') {
        Some((whole, frac)) => match whole.parse::<u64>() {
            Ok(n) => format!("{}.{}", group_digits(n), frac),
            Err(_) => text,
        },
        None => text,
    }
}
