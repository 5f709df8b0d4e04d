//! The row reader.
//!
//! [`CsvReader`] owns the file handle, the line counter and the header state,
//! and runs every record through split, reconcile, assemble, validate and
//! parse. Row-scoped failures go to the reader's [`ErrorSink`]; only fatal
//! failures come back as [`ReadError`].

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::config::ReaderOptions;
use crate::error::{ErrorPolicy, ReadError, Stage};
use crate::io::{FileInput, InputProvider};
use crate::pipeline::RowReport;
use crate::policy::HeaderPolicy;
use crate::reporter::{ErrorSink, ParseErrorEvent, Reporter};
use crate::row::{FieldValue, HeaderLabels, Row};
use crate::splitter::{RowSplitter, Split, SplitError};

/// Outcome of a single [`CsvReader::parse_next`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum NextRow {
    /// A row that passed reconciliation, validation and parsing
    Row(Row),
    /// The record on `line` failed and was reported to the sink
    Skipped { line: usize },
    /// No more records
    EndOfFile,
}

impl NextRow {
    pub fn into_row(self) -> Option<Row> {
        match self {
            NextRow::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, NextRow::EndOfFile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingHeader,
    AwaitingData,
    EndOfFile,
}

/// Reads delimited text one row at a time.
///
/// # Example
///
/// ```rust,ignore
/// use csvrows::{CsvReader, ReaderOptions};
///
/// let mut reader = CsvReader::new(ReaderOptions::csv());
/// let rows = reader.parse("fruit.csv")?;
/// if reader.reporter().has_error() {
///     for (line, messages) in reader.reporter().line_errors() {
///         eprintln!("line {line}: {}", messages.join("; "));
///     }
/// }
/// ```
#[derive(Debug)]
pub struct CsvReader<S: ErrorSink = Reporter> {
    options: ReaderOptions,
    sink: S,
    source: Option<RowSplitter>,
    source_id: String,
    line: usize,
    phase: Phase,
    labels: Option<HeaderLabels>,
}

impl CsvReader<Reporter> {
    /// Create a reader that files errors into a fresh [`Reporter`].
    pub fn new(options: ReaderOptions) -> Self {
        Self::with_sink(options, Reporter::new())
    }

    pub fn reporter(&self) -> &Reporter {
        &self.sink
    }
}

impl Default for CsvReader<Reporter> {
    fn default() -> Self {
        Self::new(ReaderOptions::default())
    }
}

impl<S: ErrorSink> CsvReader<S> {
    /// Create a reader that sends row-scoped errors to `sink`.
    pub fn with_sink(options: ReaderOptions, sink: S) -> Self {
        let phase = Self::initial_phase(&options);
        Self {
            options,
            sink,
            source: None,
            source_id: String::new(),
            line: 0,
            phase,
            labels: None,
        }
    }

    fn initial_phase(options: &ReaderOptions) -> Phase {
        if options.expects_header() {
            Phase::AwaitingHeader
        } else {
            Phase::AwaitingData
        }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Open `path` for reading. Any previously open input is closed first.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), ReadError> {
        let path = path.as_ref();
        let input = FileInput::new(path);
        self.open_as(&input, path)
    }

    /// Open any input provider, such as stdin or an in-memory buffer.
    pub fn open_provider(&mut self, provider: &dyn InputProvider) -> Result<(), ReadError> {
        let path = PathBuf::from(provider.id());
        self.open_as(provider, &path)
    }

    fn open_as(&mut self, provider: &dyn InputProvider, path: &Path) -> Result<(), ReadError> {
        self.close();

        let handle = provider.open().map_err(|e| {
            let err = ReadError::from_open(path, e);
            error!(input = provider.id(), error = %err, "cannot open input");
            err
        })?;

        self.source = Some(RowSplitter::new(handle, &self.options.dialect));
        self.source_id = provider.id().to_string();
        self.line = 0;
        self.phase = Self::initial_phase(&self.options);
        self.labels = None;

        debug!(
            input = %self.source_id,
            header_policy = %self.options.header_policy,
            "opened input"
        );
        Ok(())
    }

    /// Release the input handle. Calling it again, or without an open input, does nothing.
    ///
    /// Dropping the reader releases the handle as well.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            debug!(input = %self.source_id, lines = self.line, "closed input");
        }
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Number of records consumed so far, header included.
    pub fn current_line_number(&self) -> usize {
        self.line
    }

    /// Labels captured from the header, when the header policy reconciles against them.
    pub fn labels(&self) -> Option<&HeaderLabels> {
        self.labels.as_ref()
    }

    pub fn is_eof(&self) -> bool {
        self.phase == Phase::EndOfFile
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Read the next data row.
    ///
    /// The header, when one is expected, is consumed by the first call.
    pub fn parse_next(&mut self) -> Result<NextRow, ReadError> {
        if self.source.is_none() {
            return Err(ReadError::NotOpen);
        }

        if self.phase == Phase::AwaitingHeader {
            self.read_header()?;
        }
        if self.phase == Phase::EndOfFile {
            return Ok(NextRow::EndOfFile);
        }

        let fields = match self.split() {
            Ok(Split::Fields(fields)) => fields,
            Ok(Split::EndOfInput) => {
                self.phase = Phase::EndOfFile;
                debug!(input = %self.source_id, lines = self.line, "end of input");
                return Ok(NextRow::EndOfFile);
            }
            Err(e) => {
                let line = self.line;
                self.notify(e.to_string(), Some(line), Stage::Split);
                let outcome = self.skip_row(line, false);
                if e.is_io() {
                    // The handle is unusable; the next call reports end of file.
                    self.phase = Phase::EndOfFile;
                }
                return outcome;
            }
        };

        let line = self.line;
        let values: Vec<FieldValue> = fields.into_iter().map(FieldValue::String).collect();

        let label_count = self.labels.as_ref().map(HeaderLabels::len);
        let values = match label_count {
            Some(label_count) => match self.options.header_policy.reconcile(label_count, values) {
                Ok(values) => values,
                Err(mismatch) => {
                    self.notify(mismatch.message(line), Some(line), Stage::Reconcile);
                    if mismatch.policy == HeaderPolicy::DataOptional {
                        self.phase = Phase::EndOfFile;
                        let err = ReadError::ColumnCountExceeded {
                            line,
                            labels: mismatch.labels,
                            values: mismatch.values,
                        };
                        error!(input = %self.source_id, line, error = %err, "terminating read");
                        return Err(err);
                    }
                    return self.skip_row(line, false);
                }
            },
            None => values,
        };

        let row = match &self.labels {
            Some(labels) if self.options.use_labels_as_keys => Row::keyed(labels.clone(), values),
            _ => Row::positional(values),
        };

        self.run_pipelines(row, line)
    }

    fn read_header(&mut self) -> Result<(), ReadError> {
        let fields = match self.split() {
            Ok(Split::Fields(fields)) => fields,
            Ok(Split::EndOfInput) => {
                self.phase = Phase::EndOfFile;
                debug!(input = %self.source_id, "input is empty");
                return Ok(());
            }
            Err(e) => {
                let line = self.line;
                self.phase = Phase::EndOfFile;
                self.notify(e.to_string(), Some(line), Stage::Header);
                error!(input = %self.source_id, line, error = %e, "cannot read header");
                return Err(ReadError::FileInvalid {
                    line,
                    reason: e.to_string(),
                });
            }
        };

        let line = self.line;
        let labels = HeaderLabels::new(fields);
        self.phase = Phase::AwaitingData;

        if let Some(validator) = self.options.validator.clone() {
            let report = validator.validate_header(&labels);
            if !report.is_valid() {
                self.notify_report(&report, line, Stage::Header);
                return self.skip_row(line, true).map(|_| ());
            }
        }

        debug!(input = %self.source_id, labels = labels.len(), "read header");
        if self.options.header_policy.reconciles() {
            self.labels = Some(labels);
        }
        Ok(())
    }

    fn run_pipelines(&mut self, row: Row, line: usize) -> Result<NextRow, ReadError> {
        let mut breaking = false;
        let mut failed = false;

        if let Some(validator) = self.options.validator.clone() {
            let report = validator.validate_data_row(&row);
            if !report.is_valid() {
                self.notify_report(&report, line, Stage::Validate);
                breaking |= report.is_breaking();
                failed = true;
            }
        }

        if breaking {
            return self.skip_row(line, true);
        }

        let row = match self.options.parser.clone() {
            Some(parser) => match parser.parse_row(row) {
                Ok(row) => row,
                Err(report) => {
                    self.notify_report(&report, line, Stage::Parse);
                    return self.skip_row(line, report.is_breaking());
                }
            },
            None => row,
        };

        if failed {
            return self.skip_row(line, false);
        }
        Ok(NextRow::Row(row))
    }

    /// Skip the row on `line`, or stop the read when the failure is breaking.
    fn skip_row(&mut self, line: usize, breaking: bool) -> Result<NextRow, ReadError> {
        if breaking || self.options.error_policy == ErrorPolicy::FastFail {
            self.phase = Phase::EndOfFile;
            let reason = format!(
                "Line {} has encountered an unrecoverable error. Terminating processing.",
                line
            );
            error!(input = %self.source_id, line, "{}", reason);
            return Err(ReadError::FileInvalid { line, reason });
        }

        warn!(
            input = %self.source_id,
            line,
            "Line {} has encountered an error and will be skipped", line
        );
        Ok(NextRow::Skipped { line })
    }

    fn split(&mut self) -> Result<Split, SplitError> {
        let source = self.source.as_mut().ok_or_else(|| {
            SplitError::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "no input is open",
            ))
        })?;
        let outcome = source.next_fields();
        if !matches!(outcome, Ok(Split::EndOfInput)) {
            self.line = source.line();
        }
        outcome
    }

    fn notify(&mut self, message: String, line: Option<usize>, stage: Stage) {
        self.sink.notify(ParseErrorEvent::new(message, line, stage));
    }

    fn notify_report(&mut self, report: &RowReport, line: usize, stage: Stage) {
        for message in report.messages() {
            self.sink
                .notify(ParseErrorEvent::new(message, Some(line), stage));
        }
    }

    /// Read every remaining row, skipping the ones that fail.
    pub fn parse_all(&mut self) -> Result<Vec<Row>, ReadError> {
        let mut rows = Vec::new();
        loop {
            match self.parse_next()? {
                NextRow::Row(row) => rows.push(row),
                NextRow::Skipped { .. } => {}
                NextRow::EndOfFile => break,
            }
        }
        debug!(input = %self.source_id, rows = rows.len(), "parsed input");
        Ok(rows)
    }

    /// Open `path`, read every row, and close it again.
    pub fn parse(&mut self, path: impl AsRef<Path>) -> Result<Vec<Row>, ReadError> {
        self.open(path)?;
        let rows = self.parse_all();
        self.close();
        rows
    }

    /// Iterate over the remaining rows. Skipped rows are left out; the
    /// iterator ends after end of file or the first fatal error.
    pub fn rows(&mut self) -> Rows<'_, S> {
        Rows {
            reader: self,
            done: false,
        }
    }

    /// Iterate over the remaining rows deserialized into `T`.
    pub fn records<T: DeserializeOwned>(&mut self) -> Records<'_, S, T> {
        Records {
            rows: self.rows(),
            _marker: PhantomData,
        }
    }
}

/// Iterator returned by [`CsvReader::rows`].
#[derive(Debug)]
pub struct Rows<'a, S: ErrorSink> {
    reader: &'a mut CsvReader<S>,
    done: bool,
}

impl<S: ErrorSink> Iterator for Rows<'_, S> {
    type Item = Result<Row, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.reader.parse_next() {
                Ok(NextRow::Row(row)) => return Some(Ok(row)),
                Ok(NextRow::Skipped { .. }) => continue,
                Ok(NextRow::EndOfFile) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl<S: ErrorSink> std::iter::FusedIterator for Rows<'_, S> {}

/// Iterator returned by [`CsvReader::records`].
#[derive(Debug)]
pub struct Records<'a, S: ErrorSink, T> {
    rows: Rows<'a, S>,
    _marker: PhantomData<fn() -> T>,
}

impl<S: ErrorSink, T: DeserializeOwned> Iterator for Records<'_, S, T> {
    type Item = Result<T, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e)),
        };
        let line = self.rows.reader.current_line_number();
        Some(
            row.deserialize()
                .map_err(|source| ReadError::Deserialize { line, source }),
        )
    }
}
