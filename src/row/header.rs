//! Header label table.

use std::ops::Index;
use std::sync::Arc;

/// Ordered column labels captured from the header row.
///
/// Labels are not required to be unique. The table is immutable once built and
/// cheap to clone, so every keyed row shares the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabels {
    labels: Arc<[String]>,
}

impl HeaderLabels {
    /// Create a label table from the raw header fields.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels: labels.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at `position`, if the header has that many columns.
    pub fn get(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    /// Position of the first column carrying `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl Index<usize> for HeaderLabels {
    type Output = str;

    fn index(&self, position: usize) -> &str {
        &self.labels[position]
    }
}

impl From<Vec<String>> for HeaderLabels {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl<'a> FromIterator<&'a str> for HeaderLabels {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(str::to_string).collect())
    }
}
