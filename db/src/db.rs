//! Store connection and shared SQL helpers.
//!
//! This module provides the entry points the CLI uses to get hold of a store:
//! - Connection management (SQLite file or in-memory for tests)
//! - The error type every store operation reports
//! - Identifier quoting for generated DDL/DML
//!
//! # Type Decisions
//!
//! **Why `Box<dyn Database>` instead of a concrete connection type?**
//! The importer, exporter and statement runner only need the four operations
//! on the [`Database`] trait. Keeping them behind a trait object lets tests
//! swap in an in-memory store without touching any call site.
//!
//! **Why a message string in `DbError` instead of wrapping `rusqlite::Error`?**
//! The engine's message is shown verbatim to the operator and nothing above
//! the backend branches on the engine error code.

use std::path::Path;

use thiserror::Error;

use crate::backend::Database;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("{message}")]
    QueryFailed { message: String },
}

/// Open a store at the specified path, creating the file if absent.
///
/// Returns a trait object for backend-agnostic access.
pub fn open_db(path: &Path) -> Result<Box<dyn Database>, DbError> {
    crate::backend::open_database(path)
}

/// Create an in-memory store instance.
///
/// Used for tests to avoid disk I/O and temp file management.
pub fn open_mem_db() -> Result<Box<dyn Database>, DbError> {
    crate::backend::open_mem_database()
}

/// Wrap an identifier in double quotes for use in generated SQL.
///
/// Callers must have rejected identifiers containing `"` already; no escaping
/// is applied.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name)
}

/// Quote each identifier and join them as a parenthesized column list.
pub fn column_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| quote_identifier(n)).collect();
    format!("({})", quoted.join(", "))
}
