//! SQLite backend implementation.
//!
//! Wraps a single `rusqlite::Connection` and implements the generic
//! [`Database`] trait on top of it. The connection runs in autocommit mode;
//! `execute_many` opens its own transaction per call.

use std::path::Path;

use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection};

use super::{Database, Flow, RowSink, StatementOutcome};
use crate::db::DbError;
use crate::types::Value;

/// SQLite store implementing the generic Database trait.
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Opens (or creates) the SQLite file at the given path.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        tracing::info!(path = %path.display(), "opening SQLite store");
        let conn = Connection::open(path).map_err(|e| DbError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { conn })
    }

    /// Opens a private in-memory SQLite store.
    pub fn open_mem() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::OpenFailed {
            path: ":memory:".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { conn })
    }
}

fn query_failed(e: rusqlite::Error) -> DbError {
    DbError::QueryFailed {
        message: e.to_string(),
    }
}

impl Database for SqliteDatabase {
    #[tracing::instrument(skip(self, sql), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    fn execute(&self, sql: &str) -> Result<(), DbError> {
        self.conn.execute_batch(sql).map_err(query_failed)?;
        self.commit()
    }

    #[tracing::instrument(skip(self, sql, rows), fields(row_count = rows.len()))]
    fn execute_many(&self, sql: &str, rows: &[Vec<Value>]) -> Result<usize, DbError> {
        let tx = self.conn.unchecked_transaction().map_err(query_failed)?;
        {
            let mut stmt = tx.prepare(sql).map_err(query_failed)?;
            for row in rows {
                stmt.execute(params_from_iter(row.iter()))
                    .map_err(query_failed)?;
            }
        }
        tx.commit().map_err(query_failed)?;
        tracing::debug!(rows = rows.len(), "batch committed");
        Ok(rows.len())
    }

    #[tracing::instrument(skip(self, sql, sink), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    fn run_statement(&self, sql: &str, sink: &mut dyn RowSink) -> Result<StatementOutcome, DbError> {
        let body = statement_start(sql);
        if body.is_empty() {
            tracing::debug!("statement is empty");
            return Ok(StatementOutcome::Done);
        }
        let mut stmt = self.conn.prepare(body).map_err(query_failed)?;

        if stmt.column_count() == 0 {
            let changes = stmt.execute([]).map_err(query_failed)?;
            let outcome = if is_dml(body) {
                StatementOutcome::Modified(changes as u64)
            } else {
                StatementOutcome::Done
            };
            tracing::debug!(?outcome, "statement executed");
            return Ok(outcome);
        }

        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = names.len();
        let mut rows = stmt.query([]).map_err(query_failed)?;

        // The first step runs before the sink sees the columns, so a statement
        // that fails on execution never reaches the sink at all.
        let mut announced = false;
        let mut pulled = 0u64;
        loop {
            let next = rows.next().map_err(query_failed)?;
            if !announced {
                announced = true;
                if sink.columns(&names) == Flow::Stop {
                    break;
                }
            }
            let Some(row) = next else { break };

            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                values.push(read_value(row.get_ref(idx).map_err(query_failed)?));
            }
            pulled += 1;
            if sink.row(values) == Flow::Stop {
                break;
            }
        }

        tracing::debug!(rows = pulled, "result rows streamed");
        Ok(StatementOutcome::Rows)
    }

    fn commit(&self) -> Result<(), DbError> {
        if !self.conn.is_autocommit() {
            tracing::debug!("committing open transaction");
            self.conn.execute_batch("COMMIT").map_err(query_failed)?;
        }
        Ok(())
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Float(f) => ValueRef::Real(*f),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

fn read_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

/// Skips leading whitespace, SQL comments and empty `;` statements.
///
/// An empty result means the text compiles to no statement at all.
fn statement_start(sql: &str) -> &str {
    let mut rest = sql;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, tail)| tail);
        } else if let Some(after) = rest.strip_prefix(';') {
            rest = after;
        } else {
            return rest;
        }
    }
}

/// True if the statement's leading keyword is INSERT, UPDATE, DELETE or REPLACE.
///
/// Only these statements get an affected-row count; SQLite's change counter
/// is stale for everything else.
fn is_dml(sql: &str) -> bool {
    let keyword: String = statement_start(sql)
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();
    matches!(keyword.as_str(), "INSERT" | "UPDATE" | "DELETE" | "REPLACE")
}
