//! File and stdin inputs.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use super::InputProvider;

/// Standard input. Can only be read through once.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinInput;

impl StdinInput {
    pub const ID: &'static str = "-";

    pub fn new() -> Self {
        StdinInput
    }
}

impl InputProvider for StdinInput {
    fn id(&self) -> &str {
        Self::ID
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::stdin()))
    }
}

/// A delimited file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    path: PathBuf,
    display: String,
}

impl FileInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.to_string_lossy().into_owned();
        Self { path, display }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl From<&Path> for FileInput {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for FileInput {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl InputProvider for FileInput {
    fn id(&self) -> &str {
        &self.display
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        let file = File::open(&self.path)?;
        // On Unix a directory opens fine and only fails on the first read.
        if file.metadata()?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is a directory", self.display),
            ));
        }
        Ok(Box::new(BufReader::new(file)))
    }
}
