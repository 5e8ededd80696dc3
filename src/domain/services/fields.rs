//! Parsing of loosely typed form values.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::error::FormError;

pub const MAX_TEXT_LEN: usize = 32;

/// Returns the trimmed value, treating absent and blank input alike.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Every listed value must be present.
pub fn require_all(values: &[&Option<String>]) -> Result<(), FormError> {
    if values.iter().all(|v| present(v).is_some()) {
        Ok(())
    } else {
        Err(FormError::MissingFields)
    }
}

pub fn parse_int(value: &Option<String>, field: &'static str) -> Result<i64, FormError> {
    let raw = present(value).ok_or(FormError::MissingFields)?;
    raw.parse::<i64>().map_err(|_| FormError::InvalidField(field))
}

/// Trimmed text no longer than [`MAX_TEXT_LEN`] characters.
pub fn bounded_text(value: &Option<String>, label: &'static str) -> Result<String, FormError> {
    let raw = present(value).ok_or(FormError::MissingFields)?;
    if raw.chars().count() > MAX_TEXT_LEN {
        return Err(FormError::FieldTooLong(label));
    }
    Ok(raw.to_string())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, the latter read as a
/// calendar day in `tz`.
pub fn parse_date(value: &str, tz: Tz) -> Result<NaiveDate, FormError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&tz).date_naive())
        .map_err(|_| FormError::InvalidDate)
}
