//! Row parsing trait.

use super::{FieldError, RowReport};
use crate::row::{FieldKey, FieldValue, Row};

/// Caller-supplied transformation applied to every data row after validation.
///
/// `parse_field` may replace the value in place (for example a string with a
/// number). A failing field does not stop the remaining fields from being
/// parsed; all failures end up in the returned report.
pub trait RowParser: Send + Sync {
    /// Transform one field.
    fn parse_field(&self, key: &FieldKey, value: &mut FieldValue) -> Result<(), FieldError>;

    /// Transform every field of `row`, returning the row or the collected failures.
    fn parse_row(&self, mut row: Row) -> Result<Row, RowReport> {
        let report: RowReport = row
            .iter_mut()
            .filter_map(|(key, value)| self.parse_field(&key, value).err())
            .collect();

        if report.is_valid() {
            Ok(row)
        } else {
            Err(report)
        }
    }
}
