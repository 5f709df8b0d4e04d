//! Row validation trait.

use super::{FieldError, RowReport};
use crate::row::{FieldKey, FieldValue, HeaderLabels, Row};

/// Caller-supplied validation applied to the header and to every data row.
///
/// Implementors provide the per-field hooks; the row-level methods walk the
/// fields in column order and collect every failure into a fresh
/// [`RowReport`]. Validators only describe problems. They never modify the
/// row and never decide whether the read continues.
///
/// # Example
///
/// ```rust,ignore
/// use csvrows::{FieldError, FieldKey, FieldValue, RowValidator};
///
/// struct NonEmpty;
///
/// impl RowValidator for NonEmpty {
///     fn validate_data_field(&self, key: &FieldKey, value: &FieldValue) -> Result<(), FieldError> {
///         match value.as_str() {
///             Some("") => Err(FieldError::new(key.clone(), format!("'{key}' must not be empty"))),
///             _ => Ok(()),
///         }
///     }
/// }
/// ```
pub trait RowValidator: Send + Sync {
    /// Check one header label. Accepts every label unless overridden.
    fn validate_header_field(&self, position: usize, label: &str) -> Result<(), FieldError> {
        let _ = (position, label);
        Ok(())
    }

    /// Check one data field.
    fn validate_data_field(&self, key: &FieldKey, value: &FieldValue) -> Result<(), FieldError>;

    /// Check every header label.
    fn validate_header(&self, labels: &HeaderLabels) -> RowReport {
        labels
            .iter()
            .enumerate()
            .filter_map(|(position, label)| self.validate_header_field(position, label).err())
            .collect()
    }

    /// Check every field of an assembled data row.
    fn validate_data_row(&self, row: &Row) -> RowReport {
        row.iter()
            .filter_map(|(key, value)| self.validate_data_field(&key, value).err())
            .collect()
    }
}
