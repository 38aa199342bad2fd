//! promfind - Prometheus template variable query resolver.
//!
//! Classifies a variable query string into one of four recognized forms,
//! issues the matching metadata or instant-query request, and reshapes the
//! response into a uniform list of `{text, expandable}` entries.

pub mod datasource;
pub mod error;
pub mod find;
pub mod logging;
pub mod query;
