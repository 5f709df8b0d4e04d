//! Reader configuration.
//!
//! This module provides:
//! - `Dialect`: Delimiter, enclosure, escape and record-length settings
//! - `ReaderOptions`: Everything a reader needs, built in code
//! - `ReaderConfig`: The serializable subset, loaded from JSON or YAML

mod document;
mod options;

pub use document::ReaderConfig;
pub use options::{Dialect, ReaderOptions};
