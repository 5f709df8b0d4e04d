//! Field errors and per-row reports.

use std::fmt;

use crate::row::{FieldKey, FieldValue};

/// How a field failure should be treated by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Skip the row and keep reading
    #[default]
    Recoverable,
    /// Stop reading the file
    Breaking,
}

/// A failure attributed to a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub key: FieldKey,
    pub message: String,
    pub severity: Severity,
}

impl FieldError {
    pub fn new(key: impl Into<FieldKey>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            severity: Severity::Recoverable,
        }
    }

    /// Generic "does not match expected format" error for `value`.
    pub fn invalid_format(key: impl Into<FieldKey>, value: &FieldValue) -> Self {
        let key = key.into();
        let message = format!(
            "The value {} for the specified field '{}' does not match expected format",
            describe_value(value),
            key
        );
        Self::new(key, message)
    }

    /// Error for a header label rejected by a validator.
    pub fn invalid_header(position: usize, label: &str) -> Self {
        let message = if label.is_empty() {
            "The header field does not match the format dictated by the options".to_string()
        } else {
            format!(
                "The header field '{}' does not match the format dictated by the options",
                label
            )
        };
        Self::new(FieldKey::Index(position), message)
    }

    /// Mark this error as breaking.
    pub fn breaking(mut self) -> Self {
        self.severity = Severity::Breaking;
        self
    }

    pub fn is_breaking(&self) -> bool {
        self.severity == Severity::Breaking
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldError {}

fn describe_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => "(empty)".to_string(),
        FieldValue::String(s) => format!("'{}'", s),
        other => format!("'{}'", other),
    }
}

/// Errors collected by one validation or parsing pass over one row.
///
/// A fresh report is produced per call; it is valid when it holds no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowReport {
    errors: Vec<FieldError>,
}

impl RowReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Record the outcome of a field hook.
    pub fn record(&mut self, outcome: Result<(), FieldError>) {
        if let Err(e) = outcome {
            self.push(e);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any error asks for the read to stop.
    pub fn is_breaking(&self) -> bool {
        self.errors.iter().any(FieldError::is_breaking)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }
}

impl FromIterator<FieldError> for RowReport {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RowReport {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
