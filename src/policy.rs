//! Header policies and column-count reconciliation.

use std::fmt;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::row::FieldValue;

/// How data rows relate to the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum HeaderPolicy {
    /// The file has no header; every line is data
    NoHeader,
    /// The first line is consumed and discarded; rows are never reconciled
    DisregardHeader,
    /// Rows may have fewer values than labels; trailing columns are null
    #[default]
    DataOptional,
    /// Rows must have exactly one value per label
    DataRequired,
}

impl HeaderPolicy {
    /// Parse a policy name. Accepts the short and legacy spellings.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "noHeader" => Some(HeaderPolicy::NoHeader),
            "disregardHeader" | "disregard" => Some(HeaderPolicy::DisregardHeader),
            "dataOptional" | "subDataOptional" => Some(HeaderPolicy::DataOptional),
            "dataRequired" | "subDataRequired" => Some(HeaderPolicy::DataRequired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderPolicy::NoHeader => "noHeader",
            HeaderPolicy::DisregardHeader => "disregardHeader",
            HeaderPolicy::DataOptional => "dataOptional",
            HeaderPolicy::DataRequired => "dataRequired",
        }
    }

    /// Whether the first line of the file is a header.
    pub fn expects_header(&self) -> bool {
        !matches!(self, HeaderPolicy::NoHeader)
    }

    /// Whether data rows are checked against the header's label count.
    pub fn reconciles(&self) -> bool {
        matches!(
            self,
            HeaderPolicy::DataOptional | HeaderPolicy::DataRequired
        )
    }

    /// Check `values` against `label_count`, padding with nulls where allowed.
    pub fn reconcile(
        &self,
        label_count: usize,
        mut values: Vec<FieldValue>,
    ) -> Result<Vec<FieldValue>, ColumnMismatch> {
        let value_count = values.len();
        match self {
            HeaderPolicy::NoHeader | HeaderPolicy::DisregardHeader => Ok(values),
            HeaderPolicy::DataOptional => {
                if value_count > label_count {
                    return Err(ColumnMismatch {
                        policy: *self,
                        labels: label_count,
                        values: value_count,
                    });
                }
                values.resize(label_count, FieldValue::Null);
                Ok(values)
            }
            HeaderPolicy::DataRequired => {
                if value_count != label_count {
                    return Err(ColumnMismatch {
                        policy: *self,
                        labels: label_count,
                        values: value_count,
                    });
                }
                Ok(values)
            }
        }
    }
}

impl fmt::Display for HeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for HeaderPolicy {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        HeaderPolicy::from_str(&s).ok_or(ConfigError::UnsupportedHeaderPolicy(s))
    }
}

/// A data row whose value count does not fit the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMismatch {
    pub policy: HeaderPolicy,
    pub labels: usize,
    pub values: usize,
}

impl ColumnMismatch {
    /// Human-readable message attributed to `line`.
    pub fn message(&self, line: usize) -> String {
        let rule = match self.policy {
            HeaderPolicy::DataRequired => "must equal",
            _ => "must be <=",
        };
        format!(
            "Parse error in file, line {}: The line contains {} values and the header row contains {} labels. The number of values {} the number of labels.",
            line, self.values, self.labels, rule
        )
    }
}
