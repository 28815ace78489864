//! Backend abstraction layer for store operations.
//!
//! The importer, exporter and statement runner only talk to a [`Database`]
//! trait object, so tests can run against an in-memory store and the
//! SQLite-specific details stay in [`sqlite`].

use std::path::Path;

use crate::db::DbError;
use crate::types::Value;

/// Whether a [`RowSink`] wants more rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Receiver for a row-producing statement's result.
///
/// Rows are pushed one at a time while the statement's cursor is live; nothing
/// is buffered by the backend. Returning [`Flow::Stop`] releases the cursor
/// without pulling further rows.
pub trait RowSink {
    /// Called once with the result's column names, before any row.
    fn columns(&mut self, names: &[String]) -> Flow;

    /// Called for each result row, in order.
    fn row(&mut self, values: Vec<Value>) -> Flow;
}

/// What a single statement did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementOutcome {
    /// The statement carried column metadata and its rows went to the sink.
    Rows,
    /// A data-modifying statement with a known affected-row count.
    Modified(u64),
    /// A statement for which the store cannot report a count (DDL, PRAGMA, ...).
    Done,
}

/// Core trait for store operations.
///
/// Implementations hold one connection for their whole lifetime and are used
/// from a single thread.
pub trait Database {
    /// Execute one or more statements that return no rows, then commit.
    fn execute(&self, sql: &str) -> Result<(), DbError>;

    /// Execute one parameterized statement once per row inside a single
    /// transaction, committing at the end. Returns the number of rows bound.
    ///
    /// On failure the transaction is rolled back; earlier calls stay committed.
    fn execute_many(&self, sql: &str, rows: &[Vec<Value>]) -> Result<usize, DbError>;

    /// Execute one statement, streaming any result rows into `sink`.
    fn run_statement(&self, sql: &str, sink: &mut dyn RowSink) -> Result<StatementOutcome, DbError>;

    /// Commit any transaction a previous statement left open.
    fn commit(&self) -> Result<(), DbError>;
}

pub mod sqlite;

/// Opens a store backed by the file at `path`, creating it if absent.
pub fn open_database(path: &Path) -> Result<Box<dyn Database>, DbError> {
    Ok(Box::new(sqlite::SqliteDatabase::open(path)?))
}

/// Opens a private in-memory store.
pub fn open_mem_database() -> Result<Box<dyn Database>, DbError> {
    Ok(Box::new(sqlite::SqliteDatabase::open_mem()?))
}
