//! Closure-built validators and parsers.
//!
//! Lets callers assemble a pipeline without writing a trait implementation.

use std::fmt;
use std::sync::Arc;

use super::{FieldError, RowParser, RowValidator};
use crate::row::{FieldKey, FieldValue};

/// Check applied to a data field. `Err` carries the message to report; an
/// empty message falls back to the generic format error.
pub type FieldCheckFn = Arc<dyn Fn(&FieldValue) -> Result<(), String> + Send + Sync>;

/// Check applied to a header label.
pub type HeaderCheckFn = Arc<dyn Fn(usize, &str) -> bool + Send + Sync>;

/// Transformation applied to a data field.
pub type FieldParseFn = Arc<dyn Fn(&FieldValue) -> Result<FieldValue, String> + Send + Sync>;

#[derive(Clone)]
struct Rule {
    key: FieldKey,
    check: FieldCheckFn,
    breaking: bool,
}

/// A [`RowValidator`] made of per-field closures.
///
/// Rules keyed by label apply to keyed rows; rules keyed by position apply to
/// positional rows.
///
/// # Example
///
/// ```rust,ignore
/// use csvrows::FieldRules;
///
/// let rules = FieldRules::new()
///     .rule("color", |v| match v.as_str() {
///         Some("red" | "yellow" | "green") => Ok(()),
///         _ => Err(String::new()),
///     })
///     .header_check(|_, label| !label.trim().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct FieldRules {
    header: Option<HeaderCheckFn>,
    rules: Vec<Rule>,
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("has_header_check", &self.header.is_some())
            .field(
                "keys",
                &self.rules.iter().map(|r| &r.key).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recoverable rule for the field at `key`.
    pub fn rule<F>(mut self, key: impl Into<FieldKey>, check: F) -> Self
    where
        F: Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            key: key.into(),
            check: Arc::new(check),
            breaking: false,
        });
        self
    }

    /// Add a rule whose failure stops the read.
    pub fn fatal_rule<F>(mut self, key: impl Into<FieldKey>, check: F) -> Self
    where
        F: Fn(&FieldValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            key: key.into(),
            check: Arc::new(check),
            breaking: true,
        });
        self
    }

    /// Set the check applied to every header label.
    pub fn header_check<F>(mut self, check: F) -> Self
    where
        F: Fn(usize, &str) -> bool + Send + Sync + 'static,
    {
        self.header = Some(Arc::new(check));
        self
    }

    /// Require the header to contain exactly these labels, in this order.
    pub fn expect_labels(self, expected: &[&str]) -> Self {
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        self.header_check(move |position, label| {
            expected.get(position).is_some_and(|e| e == label)
        })
    }
}

impl RowValidator for FieldRules {
    fn validate_header_field(&self, position: usize, label: &str) -> Result<(), FieldError> {
        match &self.header {
            Some(check) if !check(position, label) => {
                Err(FieldError::invalid_header(position, label))
            }
            _ => Ok(()),
        }
    }

    fn validate_data_field(&self, key: &FieldKey, value: &FieldValue) -> Result<(), FieldError> {
        for rule in self.rules.iter().filter(|r| &r.key == key) {
            if let Err(message) = (rule.check)(value) {
                let err = if message.is_empty() {
                    FieldError::invalid_format(key.clone(), value)
                } else {
                    FieldError::new(key.clone(), message)
                };
                return Err(if rule.breaking {
                    err.breaking()
                } else {
                    err
                });
            }
        }
        Ok(())
    }
}

/// A [`RowParser`] made of per-field closures, applied in registration order.
#[derive(Clone, Default)]
pub struct FieldParsers {
    parsers: Vec<(FieldKey, FieldParseFn)>,
}

impl fmt::Debug for FieldParsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldParsers")
            .field(
                "keys",
                &self.parsers.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FieldParsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transformation for the field at `key`.
    pub fn parser<F>(mut self, key: impl Into<FieldKey>, parse: F) -> Self
    where
        F: Fn(&FieldValue) -> Result<FieldValue, String> + Send + Sync + 'static,
    {
        self.parsers.push((key.into(), Arc::new(parse)));
        self
    }
}

impl RowParser for FieldParsers {
    fn parse_field(&self, key: &FieldKey, value: &mut FieldValue) -> Result<(), FieldError> {
        for (_, parse) in self.parsers.iter().filter(|(k, _)| k == key) {
            match parse(&*value) {
                Ok(parsed) => *value = parsed,
                Err(message) if message.is_empty() => {
                    return Err(FieldError::invalid_format(key.clone(), value));
                }
                Err(message) => return Err(FieldError::new(key.clone(), message)),
            }
        }
        Ok(())
    }
}
