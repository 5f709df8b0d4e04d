//! Error types and policies for csvrows.
//!
//! This module provides:
//! - `ErrorPolicy`: Controls whether row-scoped failures stop the read
//! - `Stage`: Indicates where in the row pipeline a failure occurred
//! - `ReadError`: Fatal errors returned from the reader
//! - `ConfigError`: Errors raised while building reader options

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Treat the first row-scoped failure as breaking
    FastFail,
    /// Report row-scoped failures, skip the row and keep reading
    #[default]
    Accumulate,
}

impl ErrorPolicy {
    /// Parse a policy from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "fastfail" => Some(ErrorPolicy::FastFail),
            "accumulate" => Some(ErrorPolicy::Accumulate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Acquiring the file handle
    Open,
    /// Splitting a record into fields
    Split,
    /// Reading or validating the header row
    Header,
    /// Column-count reconciliation against the header
    Reconcile,
    Validate,
    Parse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Split => write!(f, "Split"),
            Stage::Header => write!(f, "Header"),
            Stage::Reconcile => write!(f, "Reconcile"),
            Stage::Validate => write!(f, "Validate"),
            Stage::Parse => write!(f, "Parse"),
        }
    }
}

/// Fatal errors. Once one of these is returned the read is over.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot read file '{}': {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open file '{}': {source}", path.display())]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The header could not be read or validated, or a row failure was breaking.
    #[error("line {line}: {reason}")]
    FileInvalid { line: usize, reason: String },

    #[error(
        "Parse error in file, line {line}: The line contains {values} values and the header row only contains {labels} labels. The number of values must be <= the number of labels."
    )]
    ColumnCountExceeded {
        line: usize,
        labels: usize,
        values: usize,
    },

    #[error("no file is open")]
    NotOpen,

    #[error("line {line}: row does not match the requested record type: {source}")]
    Deserialize {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ReadError {
    /// Classify an error returned while acquiring a handle for `path`.
    pub fn from_open(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => ReadError::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => ReadError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            },
            _ => ReadError::FileOpenFailed {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// The stage the error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            ReadError::FileNotFound { .. }
            | ReadError::FileUnreadable { .. }
            | ReadError::FileOpenFailed { .. }
            | ReadError::NotOpen => Stage::Open,
            ReadError::FileInvalid { .. } => Stage::Header,
            ReadError::ColumnCountExceeded { .. } => Stage::Reconcile,
            ReadError::Deserialize { .. } => Stage::Parse,
        }
    }

    /// Line the error is attributed to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ReadError::FileInvalid { line, .. }
            | ReadError::ColumnCountExceeded { line, .. }
            | ReadError::Deserialize { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Errors raised synchronously while building reader options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("\"{0}\" is not a supported option.")]
    UnsupportedOption(String),

    #[error("\"{0}\" is not a supported header policy option.")]
    UnsupportedHeaderPolicy(String),

    #[error("invalid value for option \"{name}\": {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("cannot parse configuration document: {0}")]
    Document(Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
