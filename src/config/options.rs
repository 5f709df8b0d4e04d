//! Reader options.

use std::fmt;
use std::sync::Arc;

use crate::error::ErrorPolicy;
use crate::pipeline::{RowParser, RowValidator};
use crate::policy::HeaderPolicy;

/// How records are split into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field separator
    pub delimiter: u8,
    /// Quoting character
    pub enclosure: u8,
    /// Escape character inside quoted fields, if any
    pub escape: Option<u8>,
    /// Upper bound on a record's length in bytes; 0 means unbounded
    pub max_line_length: usize,
}

impl Dialect {
    pub const DEFAULT_DELIMITER: u8 = b'\t';
    pub const DEFAULT_ENCLOSURE: u8 = b'"';
    pub const DEFAULT_ESCAPE: u8 = b'\\';
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: Self::DEFAULT_DELIMITER,
            enclosure: Self::DEFAULT_ENCLOSURE,
            escape: Some(Self::DEFAULT_ESCAPE),
            max_line_length: 0,
        }
    }
}

/// Options for a [`CsvReader`](crate::CsvReader).
#[derive(Clone)]
pub struct ReaderOptions {
    pub dialect: Dialect,
    pub header_policy: HeaderPolicy,
    /// Emit keyed rows when the header's labels are available
    pub use_labels_as_keys: bool,
    /// Whether row-scoped failures stop the read
    pub error_policy: ErrorPolicy,
    pub validator: Option<Arc<dyn RowValidator>>,
    pub parser: Option<Arc<dyn RowParser>>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            header_policy: HeaderPolicy::default(),
            use_labels_as_keys: true,
            error_policy: ErrorPolicy::default(),
            validator: None,
            parser: None,
        }
    }
}

impl fmt::Debug for ReaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderOptions")
            .field("dialect", &self.dialect)
            .field("header_policy", &self.header_policy)
            .field("use_labels_as_keys", &self.use_labels_as_keys)
            .field("error_policy", &self.error_policy)
            .field("has_validator", &self.validator.is_some())
            .field("has_parser", &self.parser.is_some())
            .finish()
    }
}

impl ReaderOptions {
    /// Create options with the defaults: tab-delimited, `dataOptional`, keyed rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-delimited defaults.
    pub fn csv() -> Self {
        Self::default().with_delimiter(b',')
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.dialect.delimiter = delimiter;
        self
    }

    pub fn with_enclosure(mut self, enclosure: u8) -> Self {
        self.dialect.enclosure = enclosure;
        self
    }

    pub fn with_escape(mut self, escape: Option<u8>) -> Self {
        self.dialect.escape = escape;
        self
    }

    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.dialect.max_line_length = max;
        self
    }

    pub fn with_header_policy(mut self, policy: HeaderPolicy) -> Self {
        self.header_policy = policy;
        self
    }

    pub fn with_labels_as_keys(mut self, enabled: bool) -> Self {
        self.use_labels_as_keys = enabled;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Set the validation pipeline.
    pub fn with_validator<V: RowValidator + 'static>(self, validator: V) -> Self {
        self.with_shared_validator(Arc::new(validator))
    }

    /// Set a validation pipeline shared with other readers.
    pub fn with_shared_validator(mut self, validator: Arc<dyn RowValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Set the parsing pipeline.
    pub fn with_parser<P: RowParser + 'static>(self, parser: P) -> Self {
        self.with_shared_parser(Arc::new(parser))
    }

    /// Set a parsing pipeline shared with other readers.
    pub fn with_shared_parser(mut self, parser: Arc<dyn RowParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Whether the first line is a header.
    pub fn expects_header(&self) -> bool {
        self.header_policy.expects_header()
    }
}
