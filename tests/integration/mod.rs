//! Integration tests for promfind.

pub mod error_test;
pub mod process_test;
