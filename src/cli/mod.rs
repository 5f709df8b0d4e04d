//! CLI helpers for csvrows.
//!
//! Converts command-line tokens into input providers and dialect settings.
//! With the `sarge` feature, [`InputArgs`] can be registered directly on a
//! `sarge::ArgumentReader`.
//!
//! Input tokens:
//! - `-` or `stdin`: read standard input
//! - `=<content>`: inline content
//! - `@<path>` or `<path>`: a file

#[cfg(feature = "sarge")]
mod sarge;

use std::io::{self, Write};
use std::sync::Arc;

use thiserror::Error;

use crate::config::ReaderOptions;
use crate::error::{ConfigError, ReadError};
use crate::io::{FileInput, InMemorySource, InputProvider, StdinInput};
use crate::reader::CsvReader;
use crate::reporter::Reporter;

/// Input tokens collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArgs(pub Vec<String>);

impl InputArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input token.
    pub fn with_input(mut self, token: &str) -> Self {
        self.0.push(normalize_token(token));
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if reading from stdin.
    pub fn is_stdin(&self) -> bool {
        self.0.iter().any(|s| s == StdinInput::ID)
    }

    /// One provider per token, in order.
    pub fn providers(&self) -> Vec<Arc<dyn InputProvider>> {
        self.0.iter().map(|token| provider_for(token)).collect()
    }
}

/// Canonical form of an input token: `stdin` becomes `-`, everything else is kept.
pub fn normalize_token(token: &str) -> String {
    if token.eq_ignore_ascii_case("stdin") {
        StdinInput::ID.to_string()
    } else {
        token.to_string()
    }
}

/// Build the provider a single input token refers to.
pub fn provider_for(token: &str) -> Arc<dyn InputProvider> {
    if token == StdinInput::ID {
        return Arc::new(StdinInput);
    }
    if let Some(content) = token.strip_prefix('=') {
        return Arc::new(InMemorySource::from_string("inline", content));
    }
    let path = token.strip_prefix('@').unwrap_or(token);
    Arc::new(FileInput::new(path))
}

/// Parse a delimiter given on the command line.
///
/// Accepts a single ASCII character, an escaped tab (`\t`), or one of the
/// names `tab`, `comma`, `semicolon`, `pipe`.
pub fn parse_delimiter(s: &str) -> Result<u8, ConfigError> {
    match s {
        "\\t" | "tab" => return Ok(b'\t'),
        "comma" => return Ok(b','),
        "semicolon" => return Ok(b';'),
        "pipe" => return Ok(b'|'),
        _ => {}
    }
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::InvalidOption {
            name: "delimiter",
            reason: format!("expected a single ASCII character, got {:?}", s),
        }),
    }
}

/// Failure while dumping an input.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),

    #[error("cannot encode row: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read one input, writing each row as a JSON line to `rows_out` and the
/// collected errors to `errors_out`.
///
/// The error report is written even when the read stops on a fatal error,
/// which is then returned. `Ok(false)` means some rows were skipped.
pub fn dump_input<W: Write, E: Write>(
    provider: &dyn InputProvider,
    options: &ReaderOptions,
    rows_out: &mut W,
    errors_out: &mut E,
) -> Result<bool, DumpError> {
    let mut csv = CsvReader::new(options.clone());
    csv.open_provider(provider)?;

    let mut fatal = None;
    for row in csv.rows() {
        match row {
            Ok(row) => {
                serde_json::to_writer(&mut *rows_out, &row)?;
                writeln!(rows_out)?;
            }
            Err(e) => {
                fatal = Some(e);
                break;
            }
        }
    }
    csv.close();

    write_report(provider.id(), csv.reporter(), errors_out)?;
    match fatal {
        Some(e) => Err(e.into()),
        None => Ok(!csv.reporter().has_error()),
    }
}

/// Write general errors, then line errors in line order, as `id: msg` and `id:line: msg`.
pub fn write_report<E: Write>(id: &str, report: &Reporter, out: &mut E) -> io::Result<()> {
    for message in report.general_errors() {
        writeln!(out, "{}: {}", id, message)?;
    }
    for (line, messages) in report.line_errors() {
        for message in messages {
            writeln!(out, "{}:{}: {}", id, line, message)?;
        }
    }
    Ok(())
}
