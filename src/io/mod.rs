//! Byte sources for the reader.
//!
//! - `InputProvider`: the trait the reader opens
//! - `FileInput`, `StdinInput`: files and standard input
//! - `InMemorySource`: a shared in-memory buffer

mod input;
mod memory;
mod std_io;

pub use input::InputProvider;
pub use memory::InMemorySource;
pub use std_io::{FileInput, StdinInput};
