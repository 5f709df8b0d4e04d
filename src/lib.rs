//! # csvrows
//!
//! Row-at-a-time reading of delimited text with header reconciliation,
//! pluggable validation and parsing, and line-scoped error reporting.
//!
//! ## Overview
//!
//! csvrows provides:
//! - **Header policies**: `noHeader`, `disregardHeader`, `dataOptional` (pad short rows
//!   with nulls) and `dataRequired` (exact column count)
//! - **Keyed or positional rows**: rows keyed by header label, or plain value sequences
//! - **Pluggable pipelines**: implement `RowValidator` / `RowParser`, or build them from
//!   closures with `FieldRules` / `FieldParsers`
//! - **Error reporting**: row-scoped failures are sent to an `ErrorSink` (the default
//!   `Reporter` files them by line) and the row is skipped; fatal failures are returned
//! - **Configuration**: a `ReaderOptions` builder, or a `ReaderConfig` document in JSON
//!   (or YAML with the `yaml` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use csvrows::{CsvReader, FieldRules, HeaderPolicy, ReaderOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rules = FieldRules::new().rule("color", |v| match v.as_str() {
//!         Some("red" | "yellow") => Ok(()),
//!         _ => Err(String::new()),
//!     });
//!
//!     let options = ReaderOptions::csv()
//!         .with_header_policy(HeaderPolicy::DataOptional)
//!         .with_validator(rules);
//!
//!     let mut reader = CsvReader::new(options);
//!     for row in reader.parse("fruit.csv")? {
//!         println!("{}", row.to_json());
//!     }
//!     if reader.reporter().has_error() {
//!         eprintln!("{:?}", reader.reporter().line_errors());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `yaml` - YAML configuration documents
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - The `csvrows_dump` command-line tool

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod policy;
pub mod reader;
pub mod reporter;
pub mod row;

mod splitter;

// Re-exports for convenience
pub use config::{Dialect, ReaderConfig, ReaderOptions};
pub use error::{ConfigError, ErrorPolicy, ReadError, Stage};
pub use io::{FileInput, InMemorySource, InputProvider, StdinInput};
pub use pipeline::{
    FieldError, FieldParsers, FieldRules, RowParser, RowReport, RowValidator, Severity,
};
pub use policy::HeaderPolicy;
pub use reader::{CsvReader, NextRow, Records, Rows};
pub use reporter::{ErrorSink, ParseErrorEvent, Reporter};
pub use row::{FieldKey, FieldValue, HeaderLabels, Row};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::ReadDiagnostic;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
