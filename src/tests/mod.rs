//! Internal tests, grouped by module.

mod cli;
