//! Row assembly.
//!
//! This module provides:
//! - `HeaderLabels`: The label table captured from the header row
//! - `FieldKey`: How a field is addressed (label or position)
//! - `Row`: An assembled row, positional or keyed by label

mod header;

pub use header::HeaderLabels;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Value of a single field.
///
/// Split fields start out as `String`, reconciliation padding is `Null`, and
/// parsers are free to replace a value with any other JSON value.
pub type FieldValue = serde_json::Value;

/// Address of a field within a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Header label (keyed rows and header fields)
    Label(String),
    /// Zero-based column position (positional rows)
    Index(usize),
}

impl FieldKey {
    /// Key for the column at `position`, preferring its label when there is one.
    pub fn for_position(labels: Option<&HeaderLabels>, position: usize) -> Self {
        match labels.and_then(|l| l.get(position)) {
            Some(label) => FieldKey::Label(label.to_string()),
            None => FieldKey::Index(position),
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            FieldKey::Label(label) => Some(label),
            FieldKey::Index(_) => None,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Label(label) => write!(f, "{}", label),
            FieldKey::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for FieldKey {
    fn from(label: &str) -> Self {
        FieldKey::Label(label.to_string())
    }
}

impl From<usize> for FieldKey {
    fn from(position: usize) -> Self {
        FieldKey::Index(position)
    }
}

/// An assembled data row.
///
/// A keyed row carries the reader's `HeaderLabels` and always holds exactly one
/// value per label. A positional row holds the values as they were split.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    labels: Option<HeaderLabels>,
    values: Vec<FieldValue>,
}

impl Row {
    /// Build a positional row.
    pub fn positional(values: Vec<FieldValue>) -> Self {
        Self {
            labels: None,
            values,
        }
    }

    /// Build a row keyed by `labels`.
    ///
    /// Callers reconcile first; the value count must equal the label count.
    pub(crate) fn keyed(labels: HeaderLabels, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self {
            labels: Some(labels),
            values,
        }
    }

    /// Build a positional row from raw split fields.
    pub fn from_strings<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::positional(
            fields
                .into_iter()
                .map(|s| FieldValue::String(s.into()))
                .collect(),
        )
    }

    pub fn is_keyed(&self) -> bool {
        self.labels.is_some()
    }

    pub fn labels(&self) -> Option<&HeaderLabels> {
        self.labels.as_ref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the first column labelled `label`. Always `None` for positional rows.
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        let position = self.labels.as_ref()?.position(label)?;
        self.values.get(position)
    }

    pub fn get_index(&self, position: usize) -> Option<&FieldValue> {
        self.values.get(position)
    }

    /// Value addressed by `key`.
    pub fn get_key(&self, key: &FieldKey) -> Option<&FieldValue> {
        match key {
            FieldKey::Label(label) => self.get(label),
            FieldKey::Index(i) => self.get_index(*i),
        }
    }

    /// String content of a field, `None` for missing, null or non-string values.
    pub fn get_str(&self, label: &str) -> Option<&str> {
        self.get(label).and_then(FieldValue::as_str)
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<FieldValue> {
        self.values
    }

    /// Iterate over `(key, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        let labels = self.labels.as_ref();
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (FieldKey::for_position(labels, i), v))
    }

    /// Iterate over `(key, value)` pairs with mutable access to the values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FieldKey, &mut FieldValue)> {
        let labels = self.labels.as_ref();
        self.values
            .iter_mut()
            .enumerate()
            .map(move |(i, v)| (FieldKey::for_position(labels, i), v))
    }

    /// Convert to a JSON object (keyed rows) or array (positional rows).
    ///
    /// With duplicate labels the first column wins, as with [`Row::get`].
    pub fn to_json(&self) -> serde_json::Value {
        match &self.labels {
            Some(labels) => {
                let obj = first_labelled(labels, &self.values)
                    .map(|(label, value)| (label.to_string(), value.clone()))
                    .collect();
                serde_json::Value::Object(obj)
            }
            None => serde_json::Value::Array(self.values.clone()),
        }
    }

    /// Deserialize the row into a typed record.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }
}

/// `(label, value)` pairs in column order, skipping columns whose label
/// already appeared earlier in the header.
fn first_labelled<'a>(
    labels: &'a HeaderLabels,
    values: &'a [FieldValue],
) -> impl Iterator<Item = (&'a str, &'a FieldValue)> {
    labels
        .iter()
        .zip(values)
        .enumerate()
        .filter(move |(i, (label, _))| labels.position(label) == Some(*i))
        .map(|(_, pair)| pair)
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.labels {
            Some(labels) => {
                let entries: Vec<_> = first_labelled(labels, &self.values).collect();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (label, value) in entries {
                    map.serialize_entry(label, value)?;
                }
                map.end()
            }
            None => {
                let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
                for value in &self.values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}
