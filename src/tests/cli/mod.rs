//! CLI helper tests.

mod dump_tests;
