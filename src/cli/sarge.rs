//! `sarge` argument support for [`InputArgs`].

use std::convert::Infallible;

use sarge::ArgumentType;

use super::{InputArgs, normalize_token};
use crate::io::StdinInput;

/// `--input a.csv,b.csv` and repeated `--input` flags both collect into one list.
/// A bare `--input` reads stdin.
impl ArgumentType for InputArgs {
    type Error = Infallible;

    const REPEATABLE: bool = true;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        let tokens = match val {
            None => vec![StdinInput::ID.to_string()],
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(normalize_token)
                .collect(),
        };
        Some(Ok(InputArgs(tokens)))
    }

    fn default_value() -> Option<Self> {
        Some(InputArgs::default())
    }
}
