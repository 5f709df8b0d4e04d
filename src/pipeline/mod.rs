//! Pluggable validation and parsing.
//!
//! This module provides:
//! - `RowValidator`: Trait for header and data-row validation
//! - `RowParser`: Trait for per-field transformation of data rows
//! - `FieldError` / `RowReport`: What a validation or parsing pass reports
//! - `FieldRules` / `FieldParsers`: Closure-built implementations
//! - `helpers`: Date, number and boolean checks for use inside hooks

pub mod helpers;
mod parser;
mod report;
mod rules;
mod validator;

pub use parser::RowParser;
pub use report::{FieldError, RowReport, Severity};
pub use rules::{FieldCheckFn, FieldParseFn, FieldParsers, FieldRules, HeaderCheckFn};
pub use validator::RowValidator;
