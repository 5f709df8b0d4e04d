//! Record splitting on top of the `csv` crate.
//!
//! Quoting and escaping rules are entirely the `csv` crate's; this module only
//! maps its records and errors onto what the reader needs.

use std::collections::VecDeque;
use std::io::{self, Read};

use thiserror::Error;

use crate::config::Dialect;

/// One split record, or the end of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    Fields(Vec<String>),
    EndOfInput,
}

/// Why a record could not be split.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("I/O error while reading: {0}")]
    Io(#[source] io::Error),

    #[error("record is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("record is {length} bytes long, the limit is {max}")]
    LineTooLong { length: usize, max: usize },

    #[error("malformed record: {0}")]
    Malformed(String),
}

impl SplitError {
    /// Whether the failure came from the underlying handle rather than the data.
    pub fn is_io(&self) -> bool {
        matches!(self, SplitError::Io(_))
    }
}

impl From<csv::Error> for SplitError {
    fn from(e: csv::Error) -> Self {
        let message = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => SplitError::Io(io),
            csv::ErrorKind::Utf8 { .. } => SplitError::Encoding(message),
            _ => SplitError::Malformed(message),
        }
    }
}

/// Splits a byte stream into records according to a [`Dialect`].
pub struct RowSplitter {
    inner: csv::Reader<NewlineIndex<Box<dyn Read + Send>>>,
    record: csv::StringRecord,
    max_line_length: usize,
    line: usize,
}

impl std::fmt::Debug for RowSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowSplitter")
            .field("max_line_length", &self.max_line_length)
            .field("line", &self.line)
            .finish_non_exhaustive()
    }
}

impl RowSplitter {
    pub fn new(reader: Box<dyn Read + Send>, dialect: &Dialect) -> Self {
        // The header is handled by the reader, and column counts are
        // reconciled there, so the csv reader must accept ragged rows.
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(dialect.delimiter)
            .quote(dialect.enclosure)
            .escape(dialect.escape)
            .double_quote(true)
            .from_reader(NewlineIndex::new(reader));

        Self {
            inner,
            record: csv::StringRecord::new(),
            max_line_length: dialect.max_line_length,
            line: 0,
        }
    }

    /// Physical line the last record started on, 1-based. Blank lines the
    /// `csv` crate skips still count.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next record.
    pub fn next_fields(&mut self) -> Result<Split, SplitError> {
        match self.inner.read_record(&mut self.record) {
            Ok(false) => return Ok(Split::EndOfInput),
            Ok(true) => {
                let embedded = self.record.as_slice().bytes().filter(|b| *b == b'\n').count();
                self.line = self.end_line().saturating_sub(embedded);
            }
            Err(e) => {
                self.line = match e.kind() {
                    csv::ErrorKind::Io(_) => self.line + 1,
                    _ => self.end_line(),
                };
                return Err(e.into());
            }
        }

        if self.max_line_length > 0 {
            let length = self.record.as_slice().len() + self.record.len().saturating_sub(1);
            if length > self.max_line_length {
                return Err(SplitError::LineTooLong {
                    length,
                    max: self.max_line_length,
                });
            }
        }

        Ok(Split::Fields(
            self.record.iter().map(str::to_string).collect(),
        ))
    }

    /// Line holding the last byte the csv reader consumed. The terminator is
    /// excluded, so a record ending in `\n` or `\r` stays on its own line.
    fn end_line(&mut self) -> usize {
        let end = self.inner.position().byte().saturating_sub(1);
        let before = self.inner.get_mut().newlines_before(end);
        usize::try_from(before).map_or(usize::MAX, |n| n.saturating_add(1))
    }
}

/// Records the offset of every `\n` passing through, so physical line numbers
/// survive the blank lines the `csv` crate skips.
struct NewlineIndex<R> {
    inner: R,
    offset: u64,
    pending: VecDeque<u64>,
    settled: u64,
}

impl<R> NewlineIndex<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            pending: VecDeque::new(),
            settled: 0,
        }
    }

    /// Number of newlines at offsets below `byte`. Queries must not go backwards.
    fn newlines_before(&mut self, byte: u64) -> u64 {
        while self.pending.front().is_some_and(|&at| at < byte) {
            self.pending.pop_front();
            self.settled += 1;
        }
        self.settled
    }
}

impl<R: Read> Read for NewlineIndex<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        for (i, byte) in buf[..n].iter().enumerate() {
            if *byte == b'\n' {
                self.pending.push_back(self.offset + i as u64);
            }
        }
        self.offset += n as u64;
        Ok(n)
    }
}
