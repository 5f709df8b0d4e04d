//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{ConfigError, ReadError};

/// A diagnostic wrapper for reader errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct ReadDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(err: &ReadError) -> Option<String> {
    match err {
        ReadError::FileNotFound { .. } => Some("Check the input path".into()),
        ReadError::FileUnreadable { .. } => Some("Check the file permissions".into()),
        ReadError::ColumnCountExceeded { .. } => Some(
            "Add labels to the header row or switch to the dataRequired/disregardHeader policy"
                .into(),
        ),
        ReadError::FileInvalid { .. } => {
            Some("See the error report for the field-level messages".into())
        }
        ReadError::NotOpen => Some("Call open() before reading rows".into()),
        _ => None,
    }
}

impl From<ReadError> for ReadDiagnostic {
    fn from(e: ReadError) -> Self {
        let message = match e.line() {
            Some(line) => format!("[{}] at line {}", e.stage(), line),
            None => format!("[{}]", e.stage()),
        };
        ReadDiagnostic {
            message,
            help: help_for(&e),
            source: Some(Box::new(e)),
            severity: Severity::Error,
        }
    }
}

impl From<ConfigError> for ReadDiagnostic {
    fn from(e: ConfigError) -> Self {
        ReadDiagnostic {
            message: "invalid reader configuration".into(),
            source: Some(Box::new(e)),
            help: Some("Check the option names and values in your configuration".into()),
            severity: Severity::Error,
        }
    }
}

impl From<ReadError> for miette::Report {
    fn from(e: ReadError) -> Self {
        miette::Report::new(ReadDiagnostic::from(e))
    }
}
