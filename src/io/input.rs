//! The input seam between the reader and its byte sources.

use std::fmt::Debug;
use std::io::{self, Read};

/// Where a reader's bytes come from.
///
/// `open` is called once per [`CsvReader::open_provider`](crate::CsvReader::open_provider);
/// every call must yield a stream positioned at the first byte. Failures
/// keep their `io::ErrorKind`, which the reader maps onto
/// `FileNotFound` / `FileUnreadable` / `FileOpenFailed`.
pub trait InputProvider: Send + Sync + Debug {
    /// Name used in log fields and open errors: a path, `-` for stdin.
    fn id(&self) -> &str;

    fn open(&self) -> io::Result<Box<dyn Read + Send>>;
}
