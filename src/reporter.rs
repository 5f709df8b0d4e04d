//! Error reporting for non-fatal failures.
//!
//! The reader never returns per-row detail for a skipped row. Instead it sends
//! a [`ParseErrorEvent`] to the [`ErrorSink`] it was built with. [`Reporter`]
//! is the default sink: it files messages by line number.

use std::collections::BTreeMap;

use crate::error::Stage;

/// A single non-fatal error notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorEvent {
    pub message: String,
    /// 1-based line the error belongs to; `None` for file-scope errors
    pub line: Option<usize>,
    pub stage: Stage,
}

impl ParseErrorEvent {
    pub fn new(message: impl Into<String>, line: Option<usize>, stage: Stage) -> Self {
        Self {
            message: message.into(),
            line,
            stage,
        }
    }
}

/// Receiver for error notifications.
pub trait ErrorSink {
    fn notify(&mut self, event: ParseErrorEvent);
}

impl<T: ErrorSink + ?Sized> ErrorSink for &mut T {
    fn notify(&mut self, event: ParseErrorEvent) {
        (**self).notify(event);
    }
}

impl<T: ErrorSink + ?Sized> ErrorSink for Box<T> {
    fn notify(&mut self, event: ParseErrorEvent) {
        (**self).notify(event);
    }
}

/// Collects events in memory.
impl ErrorSink for Vec<ParseErrorEvent> {
    fn notify(&mut self, event: ParseErrorEvent) {
        self.push(event);
    }
}

/// Accumulates error messages by line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reporter {
    general_errors: Vec<String>,
    line_errors: BTreeMap<usize, Vec<String>>,
    has_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` under `line`, or as a file-scope error when `line` is `None`.
    pub fn add_error(&mut self, message: impl Into<String>, line: Option<usize>) {
        self.has_error = true;
        match line {
            Some(line) => self.line_errors.entry(line).or_default().push(message.into()),
            None => self.general_errors.push(message.into()),
        }
    }

    /// File-scope messages, in the order they were added.
    pub fn general_errors(&self) -> &[String] {
        &self.general_errors
    }

    /// Messages filed by line number.
    pub fn line_errors(&self) -> &BTreeMap<usize, Vec<String>> {
        &self.line_errors
    }

    /// Messages filed under `line`; empty when the line had none.
    pub fn errors_for_line(&self, line: usize) -> &[String] {
        self.line_errors.get(&line).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Total number of messages of either kind.
    pub fn error_count(&self) -> usize {
        self.general_errors.len() + self.line_errors.values().map(Vec::len).sum::<usize>()
    }
}

impl ErrorSink for Reporter {
    fn notify(&mut self, event: ParseErrorEvent) {
        self.add_error(event.message, event.line);
    }
}
