//! Field-level helpers for validators and parsers.
//!
//! Null values (padding for missing trailing columns) are accepted by every
//! helper and left untouched.

use chrono::{NaiveDate, NaiveDateTime};

use super::FieldError;
use crate::row::{FieldKey, FieldValue};

/// Render `s` as an ISO-8601 date or date-time if it matches `format`.
fn normalize_temporal(s: &str, format: &str) -> Option<String> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
        return Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
    }
    NaiveDate::parse_from_str(s, format)
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Check that a field holds a date or date-time in `format` (chrono syntax).
pub fn expect_date_format(
    key: &FieldKey,
    value: &FieldValue,
    format: &str,
) -> Result<(), FieldError> {
    match value {
        FieldValue::Null => Ok(()),
        FieldValue::String(s) if normalize_temporal(s, format).is_some() => Ok(()),
        other => Err(FieldError::invalid_format(key.clone(), other)),
    }
}

/// Replace a date or date-time string in `format` with its ISO-8601 form.
pub fn parse_datetime_field(
    key: &FieldKey,
    value: &mut FieldValue,
    format: &str,
) -> Result<(), FieldError> {
    let parsed = match value {
        FieldValue::Null => return Ok(()),
        FieldValue::String(s) => normalize_temporal(s, format),
        _ => None,
    };
    match parsed {
        Some(iso) => {
            *value = FieldValue::String(iso);
            Ok(())
        }
        None => Err(FieldError::invalid_format(key.clone(), value)),
    }
}

/// Replace a decimal integer string with a JSON number.
pub fn parse_integer_field(key: &FieldKey, value: &mut FieldValue) -> Result<(), FieldError> {
    let parsed = match value {
        FieldValue::Null | FieldValue::Number(_) => return Ok(()),
        FieldValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) => {
            *value = FieldValue::from(n);
            Ok(())
        }
        None => Err(FieldError::invalid_format(key.clone(), value)),
    }
}

/// Replace a finite floating-point string with a JSON number.
pub fn parse_float_field(key: &FieldKey, value: &mut FieldValue) -> Result<(), FieldError> {
    let parsed = match value {
        FieldValue::Null | FieldValue::Number(_) => return Ok(()),
        FieldValue::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64),
        _ => None,
    };
    match parsed {
        Some(n) => {
            *value = FieldValue::Number(n);
            Ok(())
        }
        None => Err(FieldError::invalid_format(key.clone(), value)),
    }
}

/// Replace `true/false`, `yes/no` or `1/0` (any case) with a JSON boolean.
pub fn parse_bool_field(key: &FieldKey, value: &mut FieldValue) -> Result<(), FieldError> {
    let parsed = match value {
        FieldValue::Null | FieldValue::Bool(_) => return Ok(()),
        FieldValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    match parsed {
        Some(b) => {
            *value = FieldValue::Bool(b);
            Ok(())
        }
        None => Err(FieldError::invalid_format(key.clone(), value)),
    }
}
