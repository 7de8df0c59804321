//! Parsing of raw form input into typed values.

use chrono::NaiveDate;

use dinario_domain::{validate_amount, validate_tax_rate, ValidationError};

use crate::{time::ISO_DATE_FORMAT, CoreError};

/// Parses a monetary amount typed by the user. Only finite values above zero are accepted.
pub fn parse_amount(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    Ok(validate_amount(value)?)
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()).into())
}

/// Parses an optional date field: blank input means "no date given".
pub fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw).map(Some)
}

/// Converts a percentage entry such as `"15"` into the fraction `0.15`.
///
/// Blank or non-numeric input counts as zero percent. Values outside
/// `0..=100` are rejected.
pub fn tax_rate_from_percent(raw: &str) -> Result<f64, CoreError> {
    let percent = raw.trim().parse::<f64>().unwrap_or(0.0);
    let percent = if percent.is_nan() { 0.0 } else { percent };
    Ok(validate_tax_rate(percent / 100.0)?)
}
